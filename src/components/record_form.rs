use yew::prelude::*;

use super::banner::BannerView;
use super::field::Field;
use crate::state::registration::RegistrationForm;

#[derive(Properties, PartialEq)]
pub struct RecordFormProps {
    pub form: RegistrationForm,
    pub form_id: AttrValue,
    pub submitting: bool,
    pub on_change: Callback<(&'static str, String)>,
    pub on_submit: Callback<()>,
    pub on_dismiss: Callback<()>,
}

/// Registration form for one record kind, with its result banner on top.
#[function_component(RecordForm)]
pub fn record_form(props: &RecordFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="space-y-4">
            <BannerView banner={props.form.banner.clone()} on_dismiss={props.on_dismiss.clone()} />
            <form id={props.form_id.clone()} class="bg-card p-6 rounded-[10px] shadow-sm border border-border space-y-4 max-w-xl" {onsubmit}>
                { for props.form.fields.iter().map(|field| html! {
                    <Field
                        key={field.spec.name}
                        field={field.clone()}
                        form_id={props.form_id.clone()}
                        on_change={props.on_change.clone()}
                    />
                }) }
                <button
                    type="submit"
                    disabled={props.submitting}
                    class="w-full bg-primary text-primary-foreground py-2 rounded-[10px] font-semibold hover:opacity-90 transition-opacity"
                >
                    { if props.submitting { "Please wait..." } else { "Register" } }
                </button>
            </form>
        </div>
    }
}
