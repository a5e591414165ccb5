//! State plumbing shared by the two registration pages.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::FinanceApi;
use crate::app::today;
use crate::state::registration::{FormAction, RegistrationForm};

pub struct FormHandlers {
    pub on_change: Callback<(&'static str, String)>,
    pub on_submit: Callback<()>,
    pub on_dismiss: Callback<()>,
}

pub fn handlers(
    form: &UseReducerHandle<RegistrationForm>,
    submitting: &UseStateHandle<bool>,
    api: &Rc<dyn FinanceApi>,
) -> FormHandlers {
    let on_change = {
        let form = form.clone();
        Callback::from(move |(name, value): (&'static str, String)| {
            form.dispatch(FormAction::Set(name, value))
        })
    };

    let on_submit = {
        let form = form.clone();
        let submitting = submitting.clone();
        let api = api.clone();
        Callback::from(move |_: ()| {
            let current = (*form).clone();
            let form = form.clone();
            let submitting = submitting.clone();
            let api = api.clone();
            submitting.set(true);
            spawn_local(async move {
                form.dispatch(FormAction::Submitted(current.submit(&*api, today()).await));
                submitting.set(false);
            });
        })
    };

    let on_dismiss = {
        let form = form.clone();
        Callback::from(move |_: ()| form.dispatch(FormAction::DismissBanner))
    };

    FormHandlers {
        on_change,
        on_submit,
        on_dismiss,
    }
}
