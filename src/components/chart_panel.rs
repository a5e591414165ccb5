use log::error;
use yew::prelude::*;

use crate::charts::{ChartData, ChartJs, ChartKind, ChartRenderer};
use crate::state::dashboard::{Panel, NO_DATA};
use crate::state::Theme;

#[derive(Properties, PartialEq)]
pub struct ChartPanelProps {
    pub canvas_id: AttrValue,
    pub title: AttrValue,
    pub kind: ChartKind,
    pub panel: Panel<ChartData>,
    pub theme: Theme,
    /// Line under the chart, shown only when there is data.
    #[prop_or_default]
    pub footer: Option<AttrValue>,
}

#[function_component(ChartPanel)]
pub fn chart_panel(props: &ChartPanelProps) -> Html {
    let renderer = use_mut_ref(ChartJs::default);
    let render_error = use_state(|| None::<String>);

    {
        let renderer = renderer.clone();
        let render_error = render_error.clone();
        let canvas_id = props.canvas_id.clone();
        let kind = props.kind;
        use_effect_with_deps(
            move |(panel, theme): &(Panel<ChartData>, Theme)| {
                let renderer = renderer.borrow();
                match panel {
                    Panel::Ready(data) => {
                        match renderer.render_chart(&canvas_id, kind, data, &theme.palette()) {
                            Ok(()) => render_error.set(None),
                            Err(err) => {
                                error!("{}", err);
                                render_error.set(Some(err.to_string()));
                            }
                        }
                    }
                    _ => renderer.destroy(&canvas_id),
                }
                || ()
            },
            (props.panel.clone(), props.theme),
        );
    }

    let body = match &props.panel {
        Panel::Loading => html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> },
        Panel::Empty => html! { <p class="text-sm text-muted-foreground">{ NO_DATA }</p> },
        Panel::Failed(message) => html! { <p class="text-sm text-red-500">{ message.clone() }</p> },
        Panel::Ready(_) => html! {
            <>
                <div class="relative h-72">
                    <canvas id={props.canvas_id.clone()}></canvas>
                </div>
                if let Some(message) = &*render_error {
                    <p class="text-sm text-red-500 mt-2">{ message.clone() }</p>
                }
                if let Some(footer) = &props.footer {
                    <p class="mt-4 text-sm font-bold text-foreground">{ footer.clone() }</p>
                }
            </>
        },
    };

    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
            <h3 class="font-bold text-foreground mb-4">{ props.title.clone() }</h3>
            { body }
        </div>
    }
}
