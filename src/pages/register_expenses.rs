use yew::prelude::*;

use super::registration::handlers;
use crate::app::{today, AppContext};
use crate::components::{page_shell, RecordForm};
use crate::model::RecordKind;
use crate::state::registration::{ExpenseType, RegistrationForm};

#[derive(Properties, PartialEq)]
pub struct RegisterExpensesPageProps {
    pub app: AppContext,
}

#[function_component(RegisterExpensesPage)]
pub fn register_expenses_page(props: &RegisterExpensesPageProps) -> Html {
    let expense_type = use_state(|| ExpenseType::Daily);
    let daily = use_reducer(|| RegistrationForm::new(RecordKind::DailyExpenses, today()));
    let fixed = use_reducer(|| RegistrationForm::new(RecordKind::FixedCosts, today()));
    let submitting = use_state(|| false);

    let on_type = {
        let expense_type = expense_type.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            expense_type.set(ExpenseType::from_value(&select.value()));
        })
    };

    let (form, form_id) = match *expense_type {
        ExpenseType::Daily => (&daily, "dailyExpenseForm"),
        ExpenseType::Fixed => (&fixed, "fixedCostForm"),
    };
    let handlers = handlers(form, &submitting, &props.app.api);

    let toggle = html! {
        <div class="flex items-center gap-3">
            <label for="expenseType" class="text-[10px] font-bold uppercase tracking-widest text-muted-foreground">{"Expense Type"}</label>
            <select
                id="expenseType"
                class="bg-input border border-input rounded-[10px] px-3 py-2 text-sm text-foreground"
                onchange={on_type}
            >
                { for [ExpenseType::Daily, ExpenseType::Fixed].iter().map(|t| html! {
                    <option value={t.value()} selected={*t == *expense_type}>{ t.kind().singular() }</option>
                }) }
            </select>
        </div>
    };

    page_shell(
        "Register Expenses",
        toggle,
        html! {
            <RecordForm
                key={form_id}
                form={(**form).clone()}
                {form_id}
                submitting={*submitting}
                on_change={handlers.on_change}
                on_submit={handlers.on_submit}
                on_dismiss={handlers.on_dismiss}
            />
        },
    )
}
