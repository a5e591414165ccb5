use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::app::{today, AppContext};
use crate::charts::ChartKind;
use crate::components::{page_shell, ChartPanel, RecordTable, StatCard, StatIcon, Tone};
use crate::format;
use crate::hooks::{use_document_theme, use_viewport};
use crate::state::dashboard::{self, DashboardSummary, Panel, Period, RecentEntries, SummaryCards, NO_DATA};
use crate::state::table;
use crate::state::Theme;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub app: AppContext,
}

fn summary_cards(cards: &Panel<SummaryCards>) -> Html {
    match cards {
        Panel::Loading => html! { <p class="text-sm text-muted-foreground">{"Loading..."}</p> },
        Panel::Empty => html! { <p class="text-sm text-muted-foreground">{ NO_DATA }</p> },
        Panel::Failed(message) => html! { <p class="text-sm text-red-500">{ message.clone() }</p> },
        Panel::Ready(cards) => {
            let (cash, cash_tone) = match cards.cash {
                Some(balance) => (format::currency(balance), Tone::signed(balance)),
                None => ("N/A".to_string(), Tone::Neutral),
            };
            html! {
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard
                        title="Net Profit/Loss"
                        value={format::currency(cards.net_profit)}
                        icon={StatIcon::TrendingUp}
                        tone={Tone::signed(cards.net_profit)}
                    />
                    <StatCard
                        title="Daily Average Income"
                        value={format::currency(cards.daily_average)}
                        icon={StatIcon::CreditCard}
                    />
                    <StatCard title="Cash on Hand" value={cash} icon={StatIcon::Wallet} tone={cash_tone} />
                </div>
            }
        }
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let period = use_state(Period::default);
    let summary = use_state(DashboardSummary::default);
    let recent = use_state(Vec::<RecentEntries>::new);
    let theme = use_document_theme();
    let viewport = use_viewport();

    {
        let api = props.app.api.clone();
        let summary = summary.clone();
        use_effect_with_deps(
            move |(period, _): &(Period, Theme)| {
                let period = *period;
                summary.set(DashboardSummary::default());
                spawn_local(async move {
                    summary.set(dashboard::refresh(&*api, period, today()).await);
                });
                || ()
            },
            (*period, theme),
        );
    }

    {
        let api = props.app.api.clone();
        let recent = recent.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    recent.set(dashboard::load_recent(&*api).await);
                });
                || ()
            },
            (),
        );
    }

    let actions = html! {
        <div class="flex gap-2">
            { for Period::ALL.iter().map(|p| {
                let selected = *p == *period;
                let class_name = if selected {
                    "px-4 py-2 rounded-[10px] text-xs font-bold bg-primary text-primary-foreground"
                } else {
                    "px-4 py-2 rounded-[10px] text-xs font-bold bg-secondary text-secondary-foreground hover:opacity-90"
                };
                let onclick = {
                    let period = period.clone();
                    let p = *p;
                    Callback::from(move |_| period.set(p))
                };
                html! { <button type="button" class={class_name} {onclick}>{ p.label() }</button> }
            }) }
        </div>
    };

    let expenses_total = summary.expenses.ready().map(|d| AttrValue::from(dashboard::total_label(d)));
    let income_total = summary.income.ready().map(|d| AttrValue::from(dashboard::total_label(d)));
    let global_net = summary.global.ready().map(|g| AttrValue::from(dashboard::net_label(g.net)));

    let recent_tables = recent.iter().map(|entries| match &entries.rows {
        Panel::Ready(rows) => html! {
            <RecordTable view={table::recent(entries.kind, rows, viewport)} />
        },
        Panel::Failed(message) => html! {
            <div class="bg-card p-6 rounded-[10px] border border-border">
                <h3 class="font-bold text-foreground mb-2">{ format!("Recent {}", entries.kind.label()) }</h3>
                <p class="text-sm text-red-500">{ message.clone() }</p>
            </div>
        },
        _ => html! {
            <RecordTable view={table::recent(entries.kind, &[], viewport)} empty_text={NO_DATA} />
        },
    });

    page_shell(
        "Dashboard",
        actions,
        html! {
            <>
                { summary_cards(&summary.cards) }
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <ChartPanel
                        canvas_id="expensesChart"
                        title="Expenses by Category"
                        kind={ChartKind::Pie}
                        panel={summary.expenses.clone()}
                        {theme}
                        footer={expenses_total}
                    />
                    <ChartPanel
                        canvas_id="incomeChart"
                        title="Income by Source"
                        kind={ChartKind::Pie}
                        panel={summary.income.clone()}
                        {theme}
                        footer={income_total}
                    />
                </div>
                <ChartPanel
                    canvas_id="globalChart"
                    title="Global Overview"
                    kind={ChartKind::HorizontalBar}
                    panel={summary.global.map(|g| g.data.clone())}
                    {theme}
                    footer={global_net}
                />
                { for recent_tables }
            </>
        },
    )
}
