use yew::prelude::*;

use super::field::Field;
use super::icons::icon_close;
use crate::state::browser::EditSession;

#[derive(Properties, PartialEq)]
pub struct EditModalProps {
    pub session: EditSession,
    pub saving: bool,
    pub on_change: Callback<(&'static str, String)>,
    pub on_save: Callback<()>,
    pub on_delete: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(EditModal)]
pub fn edit_modal(props: &EditModalProps) -> Html {
    let onsubmit = {
        let on_save = props.on_save.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_save.emit(());
        })
    };
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="fixed inset-0 z-40 flex items-center justify-center bg-black/40 p-4">
            <div class="w-full max-w-lg bg-card border border-border rounded-2xl shadow-lg p-6 max-h-full overflow-y-auto">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="font-bold text-foreground text-lg">{ props.session.title() }</h3>
                    <button type="button" aria-label="Close" onclick={emit(&props.on_cancel)}>{ icon_close() }</button>
                </div>
                <form class="space-y-3" {onsubmit}>
                    { for props.session.fields.iter().map(|field| html! {
                        <Field
                            key={field.spec.name}
                            field={field.clone()}
                            form_id="edit"
                            on_change={props.on_change.clone()}
                        />
                    }) }
                    <div class="flex gap-3 pt-3">
                        <button type="submit" disabled={props.saving} class="flex-1 bg-primary text-primary-foreground py-2 rounded-[10px] text-sm font-bold">
                            { if props.saving { "Saving..." } else { "Save Changes" } }
                        </button>
                        <button type="button" onclick={emit(&props.on_delete)} class="flex-1 bg-red-600 text-white py-2 rounded-[10px] text-sm font-bold">{"Delete"}</button>
                        <button type="button" onclick={emit(&props.on_cancel)} class="flex-1 bg-secondary text-secondary-foreground py-2 rounded-[10px] text-sm font-bold">{"Cancel"}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
