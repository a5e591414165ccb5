use std::future::Future;

use chrono::Datelike;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{today, AppContext};
use crate::components::icons::icon_search;
use crate::components::{page_shell, BannerView, ConfirmDialog, EditModal, RecordTable};
use crate::hooks::use_viewport;
use crate::model::RecordKind;
use crate::state::browser::{
    year_options, BrowserAction, BrowserState, MonthFilter, DELETE_PROMPT, MONTH_NAMES,
};

const SELECT_CLASS: &str = "bg-input border border-input rounded-[10px] px-3 py-2 text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[derive(Properties, PartialEq)]
pub struct DataManagementPageProps {
    pub app: AppContext,
}

/// Runs an async handler against the rendered state and hands the result
/// back to the reducer.
fn run<Fut>(state: &UseReducerHandle<BrowserState>, job: impl FnOnce(BrowserState) -> Fut)
where
    Fut: Future<Output = BrowserState> + 'static,
{
    let pending = job((**state).clone());
    state.dispatch(BrowserAction::Busy);
    let handle = state.clone();
    spawn_local(async move {
        handle.dispatch(BrowserAction::Finished(pending.await));
    });
}

fn select_value(e: &Event) -> String {
    e.target_unchecked_into::<web_sys::HtmlSelectElement>().value()
}

#[function_component(DataManagementPage)]
pub fn data_management_page(props: &DataManagementPageProps) -> Html {
    let current_year = today().year();
    let state = use_reducer(|| BrowserState::new(current_year));
    let query = use_state(String::new);
    let viewport = use_viewport();
    let api = props.app.api.clone();

    let load = {
        let state = state.clone();
        let api = api.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            run(&state, move |s| async move { s.load(&*api).await });
        })
    };

    {
        let load = load.clone();
        use_effect_with_deps(
            move |_| {
                load.emit(());
                || ()
            },
            (),
        );
    }

    let search = {
        let state = state.clone();
        let api = api.clone();
        let query = query.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            let text = (*query).clone();
            run(&state, move |s| async move { s.search(&*api, &text).await });
        })
    };

    let on_kind = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            if let Some(kind) = RecordKind::from_slug(&select_value(&e)) {
                state.dispatch(BrowserAction::SelectKind(kind));
            }
        })
    };
    let on_year = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            if let Ok(year) = select_value(&e).parse::<i32>() {
                state.dispatch(BrowserAction::SelectYear(year));
            }
        })
    };
    let on_month = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            state.dispatch(BrowserAction::SelectMonth(MonthFilter::from_value(&select_value(&e))));
        })
    };

    let on_query = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            query.set(input.value());
        })
    };
    let on_query_key = {
        let search = search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                search.emit(());
            }
        })
    };

    let on_edit = {
        let state = state.clone();
        Callback::from(move |(id, kind): (i64, RecordKind)| state.dispatch(BrowserAction::OpenEdit(id, kind)))
    };
    let on_delete = {
        let state = state.clone();
        Callback::from(move |(id, kind): (i64, RecordKind)| {
            state.dispatch(BrowserAction::RequestDelete(id, kind))
        })
    };
    let on_field = {
        let state = state.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            state.dispatch(BrowserAction::EditField(name, value))
        })
    };
    let on_save = {
        let state = state.clone();
        let api = api.clone();
        Callback::from(move |_: ()| {
            let api = api.clone();
            run(&state, move |s| async move { s.save(&*api).await });
        })
    };
    let on_modal_delete = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            if let Some(session) = state.edit.as_ref() {
                state.dispatch(BrowserAction::RequestDelete(session.id, session.kind));
            }
        })
    };
    let on_cancel = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(BrowserAction::CancelEdit))
    };
    let on_answer = {
        let state = state.clone();
        let api = api.clone();
        Callback::from(move |confirmed: bool| {
            let api = api.clone();
            run(&state, move |s| async move { s.resolve_delete(&*api, confirmed).await });
        })
    };
    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(BrowserAction::DismissBanner))
    };

    let selection = state.selection;
    let month_value = selection.month.value();
    let kinds = [RecordKind::DailyExpenses, RecordKind::FixedCosts, RecordKind::Income];

    let filters = html! {
        <div class="bg-card p-5 rounded-[10px] shadow-sm border border-border flex flex-wrap gap-3 items-end">
            <div class="flex flex-col gap-1">
                <label for="tableSelect" class="text-[10px] font-bold uppercase tracking-widest text-muted-foreground">{"Table"}</label>
                <select id="tableSelect" class={SELECT_CLASS} onchange={on_kind}>
                    { for kinds.iter().map(|kind| html! {
                        <option value={kind.slug()} selected={*kind == selection.kind}>{ kind.label() }</option>
                    }) }
                </select>
            </div>
            <div class="flex flex-col gap-1">
                <label for="yearSelect" class="text-[10px] font-bold uppercase tracking-widest text-muted-foreground">{"Year"}</label>
                <select id="yearSelect" class={SELECT_CLASS} onchange={on_year}>
                    { for year_options(current_year).into_iter().map(|year| html! {
                        <option value={year.to_string()} selected={year == selection.year}>{ year.to_string() }</option>
                    }) }
                </select>
            </div>
            <div class="flex flex-col gap-1">
                <label for="monthSelect" class="text-[10px] font-bold uppercase tracking-widest text-muted-foreground">{"Month"}</label>
                <select id="monthSelect" class={SELECT_CLASS} onchange={on_month}>
                    <option value="0" selected={month_value == "0"}>{"All Months"}</option>
                    { for MONTH_NAMES.iter().enumerate().map(|(i, name)| {
                        let value = (i + 1).to_string();
                        let selected = month_value == value;
                        html! { <option {selected} {value}>{ *name }</option> }
                    }) }
                </select>
            </div>
            <button
                type="button"
                class="bg-primary text-primary-foreground px-5 py-2 rounded-[10px] text-sm font-bold hover:opacity-90"
                disabled={state.loading}
                onclick={{
                    let load = load.clone();
                    Callback::from(move |_| load.emit(()))
                }}
            >
                { if state.loading { "Loading..." } else { "Load Data" } }
            </button>

            <div class="flex-1"></div>

            <div class="flex gap-2 items-center">
                <input
                    type="search"
                    id="globalSearchInput"
                    placeholder="Search all records..."
                    class={SELECT_CLASS}
                    value={(*query).clone()}
                    oninput={on_query}
                    onkeypress={on_query_key}
                />
                <button
                    type="button"
                    aria-label="Search"
                    class="bg-secondary text-secondary-foreground p-2 rounded-[10px] hover:opacity-90"
                    onclick={Callback::from(move |_| search.emit(()))}
                >
                    { icon_search() }
                </button>
            </div>
        </div>
    };

    let modal = state.edit.clone().map(|session| {
        html! {
            <EditModal
                {session}
                saving={state.loading}
                on_change={on_field}
                {on_save}
                on_delete={on_modal_delete}
                {on_cancel}
            />
        }
    });

    let confirm = state.pending_delete.map(|_| {
        html! { <ConfirmDialog message={DELETE_PROMPT} {on_answer} /> }
    });

    page_shell(
        "Data Management",
        html! {},
        html! {
            <>
                <BannerView banner={state.banner.clone()} {on_dismiss} />
                { filters }
                <RecordTable view={state.table(viewport)} on_edit={Some(on_edit)} on_delete={Some(on_delete)} />
                { modal }
                { confirm }
            </>
        },
    )
}
