use yew::prelude::*;

use super::icons::{icon_pencil, icon_trash};
use crate::model::RecordKind;
use crate::state::table::TableView;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {
    pub view: TableView,
    #[prop_or(true)]
    pub show_heading: bool,
    /// Rows get edit and delete buttons when set.
    #[prop_or_default]
    pub on_edit: Option<Callback<(i64, RecordKind)>>,
    #[prop_or_default]
    pub on_delete: Option<Callback<(i64, RecordKind)>>,
    #[prop_or(AttrValue::Static("No data available"))]
    pub empty_text: AttrValue,
}

#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    let view = &props.view;
    let actions = props.on_edit.is_some() || props.on_delete.is_some();
    let columns = view.headers.len() + usize::from(actions);

    let action_cell = |id: Option<i64>, kind: RecordKind| -> Html {
        let Some(id) = id else {
            return html! { <td class="px-4 py-3"></td> };
        };
        let edit = props.on_edit.clone().map(|cb| {
            html! {
                <button type="button" class="p-1 hover:text-primary" aria-label="Edit"
                    onclick={Callback::from(move |_| cb.emit((id, kind)))}>{ icon_pencil() }</button>
            }
        });
        let delete = props.on_delete.clone().map(|cb| {
            html! {
                <button type="button" class="p-1 hover:text-red-600" aria-label="Delete"
                    onclick={Callback::from(move |_| cb.emit((id, kind)))}>{ icon_trash() }</button>
            }
        });
        html! {
            <td class="px-4 py-3 text-center whitespace-nowrap">{ edit }{ delete }</td>
        }
    };

    html! {
        <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
            if props.show_heading {
                <div class="p-5 border-b border-border">
                    <h3 class="font-bold text-lg text-foreground">{ view.heading.clone() }</h3>
                </div>
            }
            <div class="overflow-x-auto">
                <table class="w-full border-collapse">
                    <thead>
                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                            { for view.headers.iter().map(|(header, align)| html! {
                                <th class={format!("px-4 py-3 font-bold {}", align.class())}>{ *header }</th>
                            }) }
                            if actions {
                                <th class="px-4 py-3 font-bold text-center">{"Actions"}</th>
                            }
                        </tr>
                    </thead>
                    <tbody class="divide-y divide-border">
                        if view.rows.is_empty() {
                            <tr>
                                <td colspan={columns.to_string()} class="px-4 py-6 text-center text-muted-foreground">{ props.empty_text.clone() }</td>
                            </tr>
                        }
                        { for view.rows.iter().enumerate().map(|(idx, row)| html! {
                            <tr key={format!("{}-{}-{}", row.kind, row.id.unwrap_or_default(), idx)} class="text-sm hover:bg-muted/40 transition-colors">
                                { for row.cells.iter().map(|cell| html! {
                                    <td class={format!("px-4 py-3 text-foreground {}", cell.align.class())}>{ cell.text.clone() }</td>
                                }) }
                                if actions {
                                    { action_cell(row.id, row.kind) }
                                }
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}
