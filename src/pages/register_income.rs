use yew::prelude::*;

use super::registration::handlers;
use crate::app::{today, AppContext};
use crate::components::{page_shell, RecordForm};
use crate::model::RecordKind;
use crate::state::registration::RegistrationForm;

#[derive(Properties, PartialEq)]
pub struct RegisterIncomePageProps {
    pub app: AppContext,
}

#[function_component(RegisterIncomePage)]
pub fn register_income_page(props: &RegisterIncomePageProps) -> Html {
    let form = use_reducer(|| RegistrationForm::new(RecordKind::Income, today()));
    let submitting = use_state(|| false);
    let handlers = handlers(&form, &submitting, &props.app.api);

    page_shell(
        "Register Income",
        html! {},
        html! {
            <RecordForm
                form={(*form).clone()}
                form_id="incomeForm"
                submitting={*submitting}
                on_change={handlers.on_change}
                on_submit={handlers.on_submit}
                on_dismiss={handlers.on_dismiss}
            />
        },
    )
}
