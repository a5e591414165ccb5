//! Dashboard aggregation: breakdown charts, summary cards and recent rows.
//!
//! Each panel resolves on its own. A failing endpoint marks only its panel
//! as failed, and an empty payload (`{}` or `[]`) means "no data" rather
//! than an error.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{FinanceApi, SummaryEndpoint, SummaryQuery};
use crate::charts::{ChartData, SOFT_BLUES, SOFT_GREENS, SOFT_REDS};
use crate::config::RECENT_ROWS;
use crate::error::{AppError, AppResult};
use crate::format;
use crate::model::record::newest_first;
use crate::model::summary::{is_empty_payload, Breakdown, CashOnHand, GlobalSummary, PeriodSummary};
use crate::model::{Record, RecordKind};

pub const NO_DATA: &str = "No data available";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    CurrentMonth,
    LastMonth,
    Last7Days,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::CurrentMonth, Period::LastMonth, Period::Last7Days];

    pub fn label(self) -> &'static str {
        match self {
            Period::CurrentMonth => "Current Month",
            Period::LastMonth => "Last Month",
            Period::Last7Days => "Last 7 Days",
        }
    }

    /// Year and month a month period refers to.
    fn month(self, today: NaiveDate) -> (i32, u32) {
        match self {
            Period::LastMonth if today.month() == 1 => (today.year() - 1, 12),
            Period::LastMonth => (today.year(), today.month() - 1),
            _ => (today.year(), today.month()),
        }
    }

    pub fn query(self, today: NaiveDate) -> SummaryQuery {
        match self {
            Period::Last7Days => SummaryQuery::Range {
                start: today - Duration::days(6),
                end: today,
            },
            _ => {
                let (year, month) = self.month(today);
                SummaryQuery::Month { year, month }
            }
        }
    }

    pub fn totals_endpoint(self) -> SummaryEndpoint {
        match self {
            Period::Last7Days => SummaryEndpoint::Weekly,
            _ => SummaryEndpoint::Monthly,
        }
    }

    pub fn contains(self, today: NaiveDate, date: NaiveDate) -> bool {
        match self.query(today) {
            SummaryQuery::Range { start, end } => start <= date && date <= end,
            SummaryQuery::Month { year, month } => date.year() == year && date.month() == month,
            SummaryQuery::None => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Panel<T> {
    Loading,
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Panel::Loading
    }
}

impl<T> Panel<T> {
    fn failed(err: &AppError) -> Self {
        Panel::Failed(format!("Error loading data: {}", err))
    }

    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Panel<U> {
        match self {
            Panel::Loading => Panel::Loading,
            Panel::Empty => Panel::Empty,
            Panel::Ready(v) => Panel::Ready(f(v)),
            Panel::Failed(msg) => Panel::Failed(msg.clone()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobalChart {
    pub data: ChartData,
    pub net: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryCards {
    pub net_profit: f64,
    pub daily_average: f64,
    /// `None` renders as `N/A`.
    pub cash: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSummary {
    pub expenses: Panel<ChartData>,
    pub income: Panel<ChartData>,
    pub cards: Panel<SummaryCards>,
    pub global: Panel<GlobalChart>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecentEntries {
    pub kind: RecordKind,
    pub rows: Panel<Vec<Record>>,
}

pub fn total_label(data: &ChartData) -> String {
    format!("Total: {}", format::currency(data.total()))
}

pub fn net_label(net: f64) -> String {
    format!("Net Profit/Loss: {}", format::currency(net))
}

pub fn is_gain(value: f64) -> bool {
    value >= 0.0
}

fn decode<T: DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value).map_err(|e| AppError::Decode(e.to_string()))
}

async fn breakdown<A: FinanceApi + ?Sized>(
    api: &A,
    endpoint: SummaryEndpoint,
    query: &SummaryQuery,
    shape: impl FnOnce(Breakdown) -> ChartData,
) -> Panel<ChartData> {
    match api.summary(endpoint, query).await {
        Ok(value) if is_empty_payload(&value) => Panel::Empty,
        Ok(value) => Panel::Ready(shape(Breakdown::from_value(&value))),
        Err(err) => {
            error!("{} failed: {}", endpoint.path(), err);
            Panel::failed(&err)
        }
    }
}

/// Income per worked day: revenue of the period's income rows divided by
/// the number of distinct dates they fall on.
pub fn daily_average(income: &[Record], period: Period, today: NaiveDate) -> f64 {
    let mut days = HashSet::new();
    let mut total = 0.0;
    for row in income {
        let Some(date) = row.date() else { continue };
        if !period.contains(today, date) {
            continue;
        }
        days.insert(date);
        total += row.number("tours_revenue_eur").unwrap_or(0.0)
            + row.number("transfers_revenue_eur").unwrap_or(0.0);
    }
    if days.is_empty() {
        0.0
    } else {
        total / days.len() as f64
    }
}

async fn cards<A: FinanceApi + ?Sized>(
    api: &A,
    period: Period,
    today: NaiveDate,
) -> AppResult<Option<SummaryCards>> {
    let query = period.query(today);
    let totals = api.summary(period.totals_endpoint(), &query).await?;
    let income = api.list(RecordKind::Income).await?;
    let cash = api.summary(SummaryEndpoint::CashOnHand, &SummaryQuery::None).await?;

    let totals: PeriodSummary = if is_empty_payload(&totals) {
        PeriodSummary::default()
    } else {
        decode(totals)?
    };
    let Some(net_profit) = totals.net_profit else {
        return Ok(None);
    };
    let cash: CashOnHand = if is_empty_payload(&cash) {
        CashOnHand::default()
    } else {
        decode(cash)?
    };
    Ok(Some(SummaryCards {
        net_profit,
        daily_average: daily_average(&income, period, today),
        cash: cash.balance,
    }))
}

fn global_chart(summary: GlobalSummary) -> GlobalChart {
    GlobalChart {
        data: ChartData {
            labels: vec![
                "Total Expenses".to_string(),
                "Total Income".to_string(),
                "Net Profit/Loss".to_string(),
            ],
            values: vec![
                summary.total_global_expenses,
                summary.total_global_income,
                summary.net_global_profit,
            ],
            colors: vec![SOFT_REDS[0], SOFT_GREENS[0], SOFT_BLUES[0]],
        },
        net: summary.net_global_profit,
    }
}

/// Fetches every panel for `period`, one request after another.
pub async fn refresh<A: FinanceApi + ?Sized>(api: &A, period: Period, today: NaiveDate) -> DashboardSummary {
    let query = period.query(today);
    debug!("refreshing dashboard for {}", period.label());

    let expenses = breakdown(api, SummaryEndpoint::ExpenseCategories, &query, |b| {
        ChartData::new(b.0, SOFT_REDS)
    })
    .await;

    let income = breakdown(api, SummaryEndpoint::IncomeSources, &query, |b| {
        ChartData::new(b.prioritised(&["Tours", "Transfers"]).0, SOFT_GREENS)
    })
    .await;

    let cards = match cards(api, period, today).await {
        Ok(Some(cards)) => Panel::Ready(cards),
        Ok(None) => Panel::Empty,
        Err(err) => {
            error!("summary cards failed: {}", err);
            Panel::failed(&err)
        }
    };

    let global = match api.summary(SummaryEndpoint::Global, &SummaryQuery::None).await {
        Ok(value) if is_empty_payload(&value) => Panel::Empty,
        Ok(value) => match decode::<GlobalSummary>(value) {
            Ok(summary) => Panel::Ready(global_chart(summary)),
            Err(err) => Panel::failed(&err),
        },
        Err(err) => {
            error!("global summary failed: {}", err);
            Panel::failed(&err)
        }
    };

    DashboardSummary {
        expenses,
        income,
        cards,
        global,
    }
}

/// Latest rows of each kind, newest first.
pub async fn load_recent<A: FinanceApi + ?Sized>(api: &A) -> Vec<RecentEntries> {
    let mut tables = Vec::with_capacity(3);
    for kind in [RecordKind::Income, RecordKind::DailyExpenses, RecordKind::FixedCosts] {
        let rows = match api.list(kind).await {
            Ok(rows) if rows.is_empty() => Panel::Empty,
            Ok(mut rows) => {
                rows.sort_by(newest_first);
                rows.truncate(RECENT_ROWS);
                Panel::Ready(rows)
            }
            Err(err) => {
                error!("recent {} failed: {}", kind, err);
                Panel::failed(&err)
            }
        };
        tables.push(RecentEntries { kind, rows });
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::fake::{Call, FakeApi};
    use futures::executor::block_on;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn path(ep: SummaryEndpoint, q: SummaryQuery) -> String {
        endpoints::summary(ep, &q)
    }

    #[test]
    fn period_queries() {
        let today = day(2024, 1, 10);
        assert_eq!(Period::CurrentMonth.query(today), SummaryQuery::Month { year: 2024, month: 1 });
        assert_eq!(Period::LastMonth.query(today), SummaryQuery::Month { year: 2023, month: 12 });
        assert_eq!(
            Period::Last7Days.query(today).query_string(),
            "?start_date=2024-01-04&end_date=2024-01-10"
        );
        assert_eq!(Period::Last7Days.totals_endpoint(), SummaryEndpoint::Weekly);
    }

    #[test]
    fn daily_average_counts_unique_dates() {
        let rows: Vec<Record> = vec![
            json!({"income_date": "2024-03-01", "tours_revenue_eur": 100, "transfers_revenue_eur": 20}),
            json!({"income_date": "2024-03-01", "tours_revenue_eur": 30}),
            json!({"income_date": "2024-03-05", "tours_revenue_eur": 50, "transfers_revenue_eur": 0}),
            json!({"income_date": "2024-02-28", "tours_revenue_eur": 999}),
        ]
        .into_iter()
        .map(Record::from)
        .collect();
        assert_eq!(daily_average(&rows, Period::CurrentMonth, day(2024, 3, 15)), 100.0);
        assert_eq!(daily_average(&rows, Period::LastMonth, day(2024, 3, 15)), 999.0);
        assert_eq!(daily_average(&[], Period::CurrentMonth, day(2024, 3, 15)), 0.0);
    }

    #[test]
    fn refresh_fetches_in_order_and_fills_panels() {
        let today = day(2024, 3, 15);
        let month = SummaryQuery::Month { year: 2024, month: 3 };
        let api = FakeApi::new()
            .with_summary(
                &path(SummaryEndpoint::ExpenseCategories, month),
                json!({"Food": 30.0, "Diesel": 70.0}),
            )
            .with_summary(
                &path(SummaryEndpoint::IncomeSources, month),
                json!({"Transfers": 40.0, "Tours": 160.0}),
            )
            .with_summary(
                &path(SummaryEndpoint::Monthly, month),
                json!({"total_monthly_expenses": 100.0, "total_monthly_income": 200.0, "net_monthly_profit": 100.0}),
            )
            .with_summary(
                &path(SummaryEndpoint::CashOnHand, SummaryQuery::None),
                json!({"doc_id": 1, "balance": -12.5}),
            )
            .with_summary(
                &path(SummaryEndpoint::Global, SummaryQuery::None),
                json!({"total_global_expenses": 1000.0, "total_global_income": 1500.0, "net_global_profit": 500.0}),
            )
            .with_records(
                RecordKind::Income,
                vec![json!({"income_date": "2024-03-02", "tours_revenue_eur": 160, "transfers_revenue_eur": 40})],
            );

        let summary = block_on(refresh(&api, Period::CurrentMonth, today));

        let calls: Vec<Call> = api.calls();
        assert_eq!(
            calls,
            vec![
                Call::Summary("/summary/expense-categories?year=2024&month=3".into()),
                Call::Summary("/summary/income-sources?year=2024&month=3".into()),
                Call::Summary("/summary/monthly?year=2024&month=3".into()),
                Call::List(RecordKind::Income),
                Call::Summary("/summary/cash-on-hand".into()),
                Call::Summary("/summary/global".into()),
            ]
        );

        let expenses = summary.expenses.ready().expect("expenses");
        assert_eq!(total_label(expenses), "Total: 100,00 €");
        assert_eq!(expenses.colors[0], SOFT_REDS[0]);

        let income = summary.income.ready().expect("income");
        assert_eq!(income.labels, vec!["Tours", "Transfers"]);
        assert_eq!(income.colors[0], SOFT_GREENS[0]);

        assert_eq!(
            summary.cards,
            Panel::Ready(SummaryCards {
                net_profit: 100.0,
                daily_average: 200.0,
                cash: Some(-12.5),
            })
        );

        let global = summary.global.ready().expect("global");
        assert_eq!(global.data.values, vec![1000.0, 1500.0, 500.0]);
        assert_eq!(net_label(global.net), "Net Profit/Loss: 500,00 €");
    }

    #[test]
    fn empty_payloads_become_empty_panels() {
        let api = FakeApi::new().with_summary(
            &path(SummaryEndpoint::Global, SummaryQuery::None),
            json!([]),
        );
        let summary = block_on(refresh(&api, Period::Last7Days, day(2024, 3, 15)));
        assert_eq!(summary.expenses, Panel::Empty);
        assert_eq!(summary.income, Panel::Empty);
        assert_eq!(summary.cards, Panel::Empty);
        assert_eq!(summary.global, Panel::Empty);
        assert!(api
            .calls()
            .contains(&Call::Summary("/summary/weekly?start_date=2024-03-09&end_date=2024-03-15".into())));
    }

    #[test]
    fn one_failing_panel_leaves_the_others() {
        let today = day(2024, 3, 15);
        let month = SummaryQuery::Month { year: 2024, month: 3 };
        let api = FakeApi::new().with_summary(
            &path(SummaryEndpoint::ExpenseCategories, month),
            json!({"Food": 5.0}),
        );
        api.fail(
            &path(SummaryEndpoint::IncomeSources, month),
            AppError::http(500, "", None),
        );
        let summary = block_on(refresh(&api, Period::CurrentMonth, today));
        assert!(summary.expenses.ready().is_some());
        assert_eq!(
            summary.income,
            Panel::Failed("Error loading data: HTTP error! status: 500".into())
        );
    }

    #[test]
    fn missing_cash_balance_is_not_an_error() {
        let today = day(2024, 3, 15);
        let month = SummaryQuery::Month { year: 2024, month: 3 };
        let api = FakeApi::new().with_summary(
            &path(SummaryEndpoint::Monthly, month),
            json!({"net_monthly_profit": -3.0}),
        );
        let summary = block_on(refresh(&api, Period::CurrentMonth, today));
        let cards = summary.cards.ready().expect("cards");
        assert_eq!(cards.cash, None);
        assert!(!is_gain(cards.net_profit));
    }

    #[test]
    fn recent_rows_are_capped_and_sorted() {
        let rows = (1..=12)
            .map(|i| json!({"doc_id": i, "cost_date": format!("2024-01-{:02}", i)}))
            .collect();
        let api = FakeApi::new().with_records(RecordKind::DailyExpenses, rows);
        let tables = block_on(load_recent(&api));
        assert_eq!(tables[0].kind, RecordKind::Income);
        assert_eq!(tables[0].rows, Panel::Empty);
        let daily = tables[1].rows.ready().expect("daily rows");
        assert_eq!(daily.len(), RECENT_ROWS);
        assert_eq!(daily[0].id(), Some(12));
    }
}
