//! Record browser: table loads, cross-kind search, inline edit and delete.
//!
//! Every handler takes the current [`BrowserState`] by value and returns the
//! next one, so a component only has to swap its state handle when the
//! future resolves.

use std::rc::Rc;

use chrono::Datelike;
use log::{debug, error, info, warn};
use serde_json::Value;
use yew::Reducible;

use super::banner::Banner;
use super::form::{self, FieldValue};
use super::table::{self, TableView};
use crate::api::FinanceApi;
use crate::config::FIRST_YEAR;
use crate::error::AppError;
use crate::format::{self, Viewport};
use crate::model::record::newest_first;
use crate::model::schema::fields_for;
use crate::model::{Record, RecordKind, TaggedRecord};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this entry?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl MonthFilter {
    /// Select value: `"0"` for all months, `"1"`..`"12"` otherwise.
    pub fn from_value(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(m @ 1..=12) => MonthFilter::Month(m),
            _ => MonthFilter::All,
        }
    }

    pub fn value(self) -> String {
        match self {
            MonthFilter::All => "0".to_string(),
            MonthFilter::Month(m) => m.to_string(),
        }
    }

    fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSelection {
    pub kind: RecordKind,
    pub year: i32,
    pub month: MonthFilter,
}

impl TableSelection {
    pub fn new(year: i32) -> Self {
        Self {
            kind: RecordKind::DailyExpenses,
            year,
            month: MonthFilter::All,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record
            .date()
            .map(|d| d.year() == self.year && self.month.matches(d.month()))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveView {
    Table,
    Search(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    pub id: i64,
    pub kind: RecordKind,
    pub fields: Vec<FieldValue>,
}

impl EditSession {
    fn from_record(id: i64, kind: RecordKind, record: &Record) -> Self {
        let fields = fields_for(kind)
            .iter()
            .map(|spec| FieldValue::from_json(*spec, record.get(spec.name)))
            .collect();
        Self { id, kind, fields }
    }

    pub fn title(&self) -> String {
        format!("Edit {} (ID: {})", format::kind_title(self.kind.slug()), self.id)
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        form::set_field(&mut self.fields, name, value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub kind: RecordKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrowserState {
    pub selection: TableSelection,
    /// Kind whose rows the table currently holds. The dropdown only takes
    /// effect on the next load.
    pub loaded_kind: RecordKind,
    pub view: ActiveView,
    pub dataset: Vec<TaggedRecord>,
    pub edit: Option<EditSession>,
    pub pending_delete: Option<PendingDelete>,
    pub banner: Option<Banner>,
    pub loading: bool,
}

impl BrowserState {
    pub fn new(current_year: i32) -> Self {
        let selection = TableSelection::new(current_year);
        Self {
            selection,
            loaded_kind: selection.kind,
            view: ActiveView::Table,
            dataset: Vec::new(),
            edit: None,
            pending_delete: None,
            banner: None,
            loading: false,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.view, ActiveView::Search(_))
    }

    /// Fetches the selected kind and keeps the selected year and month.
    pub async fn load<A: FinanceApi + ?Sized>(mut self, api: &A) -> Self {
        let selection = self.selection;
        debug!(
            "loading {} for {}/{}",
            selection.kind,
            selection.year,
            selection.month.value()
        );
        self.view = ActiveView::Table;
        self.loaded_kind = selection.kind;
        self.loading = false;
        match api.list(selection.kind).await {
            Ok(records) => {
                let mut rows: Vec<Record> =
                    records.into_iter().filter(|r| selection.matches(r)).collect();
                rows.sort_by(newest_first);
                self.dataset = rows
                    .into_iter()
                    .map(|r| TaggedRecord::new(selection.kind, r))
                    .collect();
            }
            Err(err) => {
                error!("loading {} failed: {}", selection.kind, err);
                self.dataset.clear();
                self.banner = Some(Banner::error(format!("Error loading data: {}", err)));
            }
        }
        self
    }

    /// Searches every kind for `query`. A blank query only sets a banner.
    pub async fn search<A: FinanceApi + ?Sized>(mut self, api: &A, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            self.banner = Some(Banner::error("Please enter a search query."));
            return self;
        }
        self.loading = false;
        self.view = ActiveView::Search(needle.clone());
        match fetch_matches(api, &needle).await {
            Ok(rows) => {
                debug!("search {:?} matched {} rows", needle, rows.len());
                self.dataset = rows;
            }
            Err(err) => {
                error!("search failed: {}", err);
                self.dataset.clear();
                self.banner = Some(Banner::error(format!("Error during search: {}", err)));
            }
        }
        self
    }

    /// Re-fetches whichever view is on screen.
    pub async fn reload_active<A: FinanceApi + ?Sized>(self, api: &A) -> Self {
        match self.view.clone() {
            ActiveView::Search(query) => self.search(api, &query).await,
            ActiveView::Table => self.load(api).await,
        }
    }

    /// Opens the edit form for a row of the current dataset.
    pub fn open_edit(mut self, id: i64, kind: RecordKind) -> Self {
        match self.dataset.iter().find(|row| row.is(id, kind)) {
            Some(row) => {
                self.edit = Some(EditSession::from_record(id, kind, &row.record));
            }
            None => {
                warn!("no {} row with id {} in the current view", kind, id);
                self.edit = None;
                self.banner = Some(Banner::error(AppError::NotFound { kind, id }.to_string()));
            }
        }
        self
    }

    /// Sends the edit form. The session stays open when the update fails.
    pub async fn save<A: FinanceApi + ?Sized>(mut self, api: &A) -> Self {
        let Some(session) = self.edit.clone() else {
            return self;
        };
        let body = form::payload(&session.fields);
        match api.update(session.kind, session.id, &body).await {
            Ok(()) => {
                info!("updated {} {}", session.kind, session.id);
                self.edit = None;
                self.banner = Some(Banner::success("Entry updated successfully!"));
                self.reload_active(api).await
            }
            Err(err) => {
                error!("updating {} {} failed: {}", session.kind, session.id, err);
                self.banner = Some(Banner::failure("Error updating entry", &err));
                self
            }
        }
    }

    pub fn request_delete(mut self, id: i64, kind: RecordKind) -> Self {
        self.pending_delete = Some(PendingDelete { id, kind });
        self
    }

    /// Answers the confirmation prompt. Declining sends nothing.
    pub async fn resolve_delete<A: FinanceApi + ?Sized>(mut self, api: &A, confirmed: bool) -> Self {
        let Some(target) = self.pending_delete.take() else {
            return self;
        };
        if !confirmed {
            debug!("delete of {} {} cancelled", target.kind, target.id);
            return self;
        }
        match api.delete(target.kind, target.id).await {
            Ok(()) => {
                info!("deleted {} {}", target.kind, target.id);
                if self
                    .edit
                    .as_ref()
                    .map_or(false, |s| s.id == target.id && s.kind == target.kind)
                {
                    self.edit = None;
                }
                self.banner = Some(Banner::success("Entry deleted successfully!"));
                self.reload_active(api).await
            }
            Err(err) => {
                error!("deleting {} {} failed: {}", target.kind, target.id, err);
                self.banner = Some(Banner::failure("Error deleting entry", &err));
                self
            }
        }
    }

    pub fn cancel_edit(mut self) -> Self {
        self.edit = None;
        self
    }

    pub fn dismiss_banner(mut self) -> Self {
        self.banner = None;
        self
    }

    pub fn table(&self, viewport: Viewport) -> TableView {
        table::build(
            &self.dataset,
            self.loaded_kind,
            self.is_searching(),
            viewport,
        )
    }
}

/// Changes a page applies to the newest state it holds. Async handlers run
/// on a snapshot and hand their result back through [`BrowserAction::Finished`].
#[derive(Debug)]
pub enum BrowserAction {
    Busy,
    Finished(BrowserState),
    SelectKind(RecordKind),
    SelectYear(i32),
    SelectMonth(MonthFilter),
    OpenEdit(i64, RecordKind),
    EditField(&'static str, String),
    RequestDelete(i64, RecordKind),
    CancelEdit,
    DismissBanner,
}

impl Reducible for BrowserState {
    type Action = BrowserAction;

    fn reduce(self: Rc<Self>, action: BrowserAction) -> Rc<Self> {
        let mut state = (*self).clone();
        state = match action {
            BrowserAction::Busy => {
                state.loading = true;
                state
            }
            BrowserAction::Finished(mut next) => {
                next.loading = false;
                next
            }
            BrowserAction::SelectKind(kind) => {
                state.selection.kind = kind;
                state
            }
            BrowserAction::SelectYear(year) => {
                state.selection.year = year;
                state
            }
            BrowserAction::SelectMonth(month) => {
                state.selection.month = month;
                state
            }
            BrowserAction::OpenEdit(id, kind) => state.open_edit(id, kind),
            BrowserAction::EditField(name, value) => {
                if let Some(session) = state.edit.as_mut() {
                    session.set(name, value);
                }
                state
            }
            BrowserAction::RequestDelete(id, kind) => state.request_delete(id, kind),
            BrowserAction::CancelEdit => state.cancel_edit(),
            BrowserAction::DismissBanner => state.dismiss_banner(),
        };
        Rc::new(state)
    }
}

async fn fetch_matches<A: FinanceApi + ?Sized>(
    api: &A,
    needle: &str,
) -> Result<Vec<TaggedRecord>, AppError> {
    let mut rows = Vec::new();
    for kind in RecordKind::SEARCH_ORDER {
        let records = api.list(kind).await?;
        rows.extend(
            records
                .into_iter()
                .filter(|r| matches_query(r, needle))
                .map(|r| TaggedRecord::new(kind, r)),
        );
    }
    rows.sort_by(|a, b| newest_first(&a.record, &b.record));
    Ok(rows)
}

/// True when any string or number field contains `needle` (already
/// lowercased).
pub fn matches_query(record: &Record, needle: &str) -> bool {
    record.fields().any(|(_, value)| match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => format::number_text(n).contains(needle),
        _ => false,
    })
}

/// Years offered by the filter, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (FIRST_YEAR..=current_year.max(FIRST_YEAR)).rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeApi};
    use crate::api::endpoints;
    use crate::model::schema::Align;
    use crate::state::banner::BannerKind;
    use futures::executor::block_on;
    use serde_json::json;

    fn api() -> FakeApi {
        FakeApi::new()
            .with_records(
                RecordKind::DailyExpenses,
                vec![
                    json!({"doc_id": 1, "cost_date": "2024-03-10", "description": "Diesel refill", "amount": 40, "category": "Diesel", "payment_method": "Cash"}),
                    json!({"doc_id": 2, "cost_date": "2024-03-12", "description": "Lunch", "amount": 12.5, "category": "Food", "payment_method": "Cash"}),
                    json!({"doc_id": 3, "cost_date": "2024-04-01", "description": "Garage", "amount": 300, "category": "Garage", "payment_method": "Bank Transfer"}),
                    json!({"doc_id": 4, "cost_date": "2023-12-31", "description": "Old", "amount": 5, "category": "Others", "payment_method": "Cash"}),
                    json!({"doc_id": 5, "cost_date": "2024-03-12", "description": "Snack", "amount": 3, "category": "Food", "payment_method": "Cash"}),
                ],
            )
            .with_records(
                RecordKind::FixedCosts,
                vec![json!({"doc_id": 1, "cost_date": "2024-03-01", "description": "Diesel contract", "amount_eur": 90, "cost_frequency": "Monthly"})],
            )
            .with_records(
                RecordKind::Income,
                vec![json!({"doc_id": 1, "income_date": "2024-03-11", "tours_revenue_eur": 40, "transfers_revenue_eur": 0, "hours_worked": 6})],
            )
    }

    fn ids(state: &BrowserState) -> Vec<(RecordKind, i64)> {
        state
            .dataset
            .iter()
            .map(|r| (r.source, r.id().unwrap_or(-1)))
            .collect()
    }

    fn march_2024() -> BrowserState {
        let mut state = BrowserState::new(2024);
        state.selection.month = MonthFilter::Month(3);
        state
    }

    #[test]
    fn load_filters_and_sorts_newest_first() {
        let api = api();
        let state = block_on(march_2024().load(&api));
        let d = RecordKind::DailyExpenses;
        assert_eq!(ids(&state), vec![(d, 5), (d, 2), (d, 1)]);
        assert_eq!(state.view, ActiveView::Table);
        assert_eq!(state.table(Viewport::desktop()).heading, "Table Data");
    }

    #[test]
    fn load_all_months_keeps_the_year() {
        let api = api();
        let state = block_on(BrowserState::new(2024).load(&api));
        assert_eq!(state.dataset.len(), 4);
    }

    #[test]
    fn load_failure_clears_and_reports() {
        let api = api();
        let mut state = block_on(march_2024().load(&api));
        assert!(!state.dataset.is_empty());
        api.fail(
            &endpoints::collection(RecordKind::DailyExpenses),
            AppError::http(500, "Internal Server Error", None),
        );
        state = block_on(state.load(&api));
        assert!(state.dataset.is_empty());
        let banner = state.banner.expect("banner");
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, "Error loading data: Internal Server Error");
    }

    #[test]
    fn blank_search_issues_no_request() {
        let api = api();
        let state = block_on(BrowserState::new(2024).search(&api, "   "));
        assert!(api.calls().is_empty());
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Please enter a search query.".to_string())
        );
        assert_eq!(state.view, ActiveView::Table);
    }

    #[test]
    fn search_merges_kinds_in_fetch_order_then_sorts() {
        let api = api();
        let state = block_on(BrowserState::new(2024).search(&api, "  DIESEL "));
        assert_eq!(
            api.calls(),
            vec![
                Call::List(RecordKind::DailyExpenses),
                Call::List(RecordKind::FixedCosts),
                Call::List(RecordKind::Income),
            ]
        );
        assert_eq!(
            ids(&state),
            vec![(RecordKind::DailyExpenses, 1), (RecordKind::FixedCosts, 1)]
        );
        assert_eq!(state.view, ActiveView::Search("diesel".into()));
    }

    #[test]
    fn search_matches_numbers_as_text() {
        let api = api();
        let state = block_on(BrowserState::new(2024).search(&api, "12.5"));
        assert_eq!(ids(&state), vec![(RecordKind::DailyExpenses, 2)]);
    }

    #[test]
    fn search_failure_empties_results() {
        let api = api();
        api.fail(
            &endpoints::collection(RecordKind::Income),
            AppError::Network("offline".into()),
        );
        let state = block_on(BrowserState::new(2024).search(&api, "diesel"));
        assert!(state.dataset.is_empty());
        assert_eq!(
            state.banner.as_ref().map(|b| b.message.as_str()),
            Some("Error during search: Network error: offline")
        );
        assert_eq!(state.table(Viewport::desktop()).heading, "Search Results (No Data)");
    }

    #[test]
    fn open_edit_uses_the_tagged_kind() {
        let api = api();
        let state = block_on(BrowserState::new(2024).search(&api, "diesel"));
        let state = state.open_edit(1, RecordKind::FixedCosts);
        let session = state.edit.clone().expect("session");
        assert_eq!(session.kind, RecordKind::FixedCosts);
        assert_eq!(form::field_value(&session.fields, "amount_eur"), Some("90"));
        assert_eq!(form::field_value(&session.fields, "recipient"), Some(""));

        let state = state.open_edit(1, RecordKind::Income);
        assert!(state.edit.is_none());
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Entry not found for editing.".to_string())
        );
    }

    #[test]
    fn save_coerces_numbers_and_reloads_once() {
        let api = api();
        let mut state = block_on(march_2024().load(&api)).open_edit(2, RecordKind::DailyExpenses);
        if let Some(session) = state.edit.as_mut() {
            session.set("amount", "15");
            session.set("description", "Lunch x2");
        }
        let lists_before = api.list_calls();
        let state = block_on(state.save(&api));

        let update = api
            .calls()
            .into_iter()
            .find_map(|c| match c {
                Call::Update(kind, id, body) => Some((kind, id, body)),
                _ => None,
            })
            .expect("update sent");
        assert_eq!(update.0, RecordKind::DailyExpenses);
        assert_eq!(update.1, 2);
        assert_eq!(update.2["amount"], json!(15.0));
        assert_eq!(update.2["description"], json!("Lunch x2"));

        assert_eq!(api.list_calls(), lists_before + 1);
        assert!(state.edit.is_none());
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Entry updated successfully!".to_string())
        );
    }

    #[test]
    fn save_in_search_mode_reruns_search() {
        let api = api();
        let mut state = block_on(BrowserState::new(2024).search(&api, "diesel"))
            .open_edit(1, RecordKind::FixedCosts);
        if let Some(session) = state.edit.as_mut() {
            session.set("amount_eur", "abc");
        }
        let before = api.list_calls();
        let state = block_on(state.save(&api));
        assert_eq!(api.list_calls(), before + 3);
        assert!(state.is_searching());
        let sent = api.calls().into_iter().find_map(|c| match c {
            Call::Update(_, _, body) => Some(body),
            _ => None,
        });
        assert_eq!(sent.map(|b| b["amount_eur"].clone()), Some(Value::Null));
    }

    #[test]
    fn failed_save_keeps_the_session() {
        let api = api();
        let state = block_on(march_2024().load(&api)).open_edit(1, RecordKind::DailyExpenses);
        api.fail(
            &endpoints::item(RecordKind::DailyExpenses, 1),
            AppError::http(422, "Unprocessable Entity", Some(&json!({"detail": "amount must be positive"}))),
        );
        let before = api.list_calls();
        let state = block_on(state.save(&api));
        assert!(state.edit.is_some());
        assert_eq!(api.list_calls(), before);
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Error updating entry: amount must be positive".to_string())
        );
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let api = api();
        let state = block_on(march_2024().load(&api));
        let before = state.dataset.clone();
        let calls = api.calls().len();
        let state = state.request_delete(1, RecordKind::DailyExpenses);
        assert!(state.pending_delete.is_some());
        let state = block_on(state.resolve_delete(&api, false));
        assert!(state.pending_delete.is_none());
        assert_eq!(api.calls().len(), calls);
        assert_eq!(state.dataset, before);
    }

    #[test]
    fn confirmed_delete_closes_edit_and_reloads() {
        let api = api();
        let state = block_on(march_2024().load(&api))
            .open_edit(2, RecordKind::DailyExpenses)
            .request_delete(2, RecordKind::DailyExpenses);
        let before = api.list_calls();
        let state = block_on(state.resolve_delete(&api, true));
        assert_eq!(api.list_calls(), before + 1);
        assert!(state.edit.is_none());
        assert!(!state
            .dataset
            .iter()
            .any(|r| r.is(2, RecordKind::DailyExpenses)));
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Entry deleted successfully!".to_string())
        );
    }

    #[test]
    fn failed_delete_leaves_rows() {
        let api = api();
        let state = block_on(march_2024().load(&api)).request_delete(1, RecordKind::DailyExpenses);
        api.fail(
            &endpoints::item(RecordKind::DailyExpenses, 1),
            AppError::http(404, "Not Found", Some(&json!({"detail": "Entry not found"}))),
        );
        let before = state.dataset.clone();
        let state = block_on(state.resolve_delete(&api, true));
        assert_eq!(state.dataset, before);
        assert_eq!(
            state.banner.map(|b| b.message),
            Some("Error deleting entry: Entry not found".to_string())
        );
    }

    #[test]
    fn years_run_back_to_first_year() {
        assert_eq!(year_options(2023), vec![2023, 2022, 2021, 2020]);
        assert_eq!(year_options(2019), vec![2020]);
    }

    #[test]
    fn month_filter_values() {
        assert_eq!(MonthFilter::from_value("0"), MonthFilter::All);
        assert_eq!(MonthFilter::from_value("7"), MonthFilter::Month(7));
        assert_eq!(MonthFilter::from_value("13"), MonthFilter::All);
        assert_eq!(MonthFilter::Month(3).value(), "3");
    }

    #[test]
    fn delete_in_search_mode_reruns_search() {
        let api = api();
        let state = block_on(BrowserState::new(2024).search(&api, "diesel"))
            .request_delete(1, RecordKind::FixedCosts);
        let before = api.list_calls();
        let state = block_on(state.resolve_delete(&api, true));
        assert_eq!(api.list_calls(), before + 3);
        assert!(state.is_searching());
        assert_eq!(ids(&state), vec![(RecordKind::DailyExpenses, 1)]);
    }

    #[test]
    fn columns_follow_the_loaded_kind() {
        let api = api();
        let mut state = block_on(march_2024().load(&api));
        state.selection.kind = RecordKind::Income;
        let view = state.table(Viewport::desktop());
        assert_eq!(view.headers[4], ("Amount (€)", Align::Right));
        let diesel = view
            .rows
            .iter()
            .find(|r| r.id == Some(1))
            .expect("diesel row");
        assert_eq!(diesel.cells[4].text, "40,00 €");

        let state = block_on(state.load(&api));
        assert_eq!(state.loaded_kind, RecordKind::Income);
        assert_eq!(state.table(Viewport::desktop()).headers[2].0, "Tours (€)");
    }

    #[test]
    fn dismissing_the_banner_keeps_a_newer_edit() {
        let api = api();
        let saved = {
            let state = block_on(march_2024().load(&api)).open_edit(2, RecordKind::DailyExpenses);
            block_on(state.save(&api))
        };
        assert!(saved.banner.is_some());

        let state = Rc::new(BrowserState::new(2024))
            .reduce(BrowserAction::Busy)
            .reduce(BrowserAction::Finished(saved))
            .reduce(BrowserAction::OpenEdit(1, RecordKind::DailyExpenses))
            .reduce(BrowserAction::EditField("description", "Diesel, full tank".into()))
            .reduce(BrowserAction::DismissBanner);
        assert!(state.banner.is_none());
        assert!(!state.loading);
        let session = state.edit.as_ref().expect("edit still open");
        assert_eq!(session.id, 1);
        assert_eq!(
            form::field_value(&session.fields, "description"),
            Some("Diesel, full tank")
        );
    }

    #[test]
    fn selection_changes_leave_the_rows_alone() {
        let api = api();
        let loaded = block_on(march_2024().load(&api));
        let rows = loaded.dataset.clone();
        let state = Rc::new(loaded)
            .reduce(BrowserAction::SelectKind(RecordKind::FixedCosts))
            .reduce(BrowserAction::SelectYear(2023))
            .reduce(BrowserAction::SelectMonth(MonthFilter::All));
        assert_eq!(state.dataset, rows);
        assert_eq!(state.loaded_kind, RecordKind::DailyExpenses);
        assert_eq!(state.selection.kind, RecordKind::FixedCosts);
        assert_eq!(state.selection.year, 2023);
    }
}
