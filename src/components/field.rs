use yew::prelude::*;

use crate::model::schema::FieldInput;
use crate::state::form::FieldValue;

const INPUT_CLASS: &str = "w-full bg-input border border-input rounded-[10px] px-3 py-2 text-sm text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[derive(Properties, PartialEq)]
pub struct FieldProps {
    pub field: FieldValue,
    /// Input ids are prefixed so two forms can share a page.
    pub form_id: AttrValue,
    /// `(field name, new value)`
    pub on_change: Callback<(&'static str, String)>,
}

/// One labelled input bound to a schema field.
#[function_component(Field)]
pub fn field(props: &FieldProps) -> Html {
    let spec = props.field.spec;
    let id = format!("{}-{}", props.form_id, spec.name);

    let control = match spec.input {
        FieldInput::Select(options) => {
            let on_change = props.on_change.clone();
            let onchange = Callback::from(move |e: Event| {
                let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                on_change.emit((spec.name, select.value()));
            });
            let current = props.field.value.clone();
            html! {
                <select id={id.clone()} name={spec.name} class={INPUT_CLASS} required={spec.required} {onchange}>
                    <option value="" selected={current.is_empty()}>
                        { props.field.placeholder().unwrap_or_default() }
                    </option>
                    { for options.iter().map(|opt| html! {
                        <option value={*opt} selected={current == *opt}>{ *opt }</option>
                    }) }
                </select>
            }
        }
        input => {
            let on_change = props.on_change.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let el: web_sys::HtmlInputElement = e.target_unchecked_into();
                on_change.emit((spec.name, el.value()));
            });
            let step = match input {
                FieldInput::Currency => Some("0.01"),
                FieldInput::Hours => Some("0.5"),
                _ => None,
            };
            html! {
                <input
                    id={id.clone()}
                    name={spec.name}
                    type={input.html_type()}
                    step={step}
                    min={input.is_numeric().then_some("0")}
                    class={INPUT_CLASS}
                    required={spec.required}
                    value={props.field.value.clone()}
                    {oninput}
                />
            }
        }
    };

    html! {
        <div class="space-y-1">
            <label for={id} class="text-[12px] font-bold text-muted-foreground">{ spec.label }</label>
            { control }
        </div>
    }
}
