//! Paths of the REST backend.

use chrono::NaiveDate;

use crate::model::record::RecordKind;

pub const LOGIN_TOKEN: &str = "/login/token";
pub const LOGIN_STATUS: &str = "/login/status";
pub const LOGOUT: &str = "/logout";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryEndpoint {
    Monthly,
    Weekly,
    Global,
    ExpenseCategories,
    IncomeSources,
    CashOnHand,
}

impl SummaryEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            SummaryEndpoint::Monthly => "/summary/monthly",
            SummaryEndpoint::Weekly => "/summary/weekly",
            SummaryEndpoint::Global => "/summary/global",
            SummaryEndpoint::ExpenseCategories => "/summary/expense-categories",
            SummaryEndpoint::IncomeSources => "/summary/income-sources",
            SummaryEndpoint::CashOnHand => "/summary/cash-on-hand",
        }
    }
}

/// Query parameters for a summary request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryQuery {
    None,
    Month { year: i32, month: u32 },
    Range { start: NaiveDate, end: NaiveDate },
}

impl SummaryQuery {
    pub fn query_string(&self) -> String {
        match self {
            SummaryQuery::None => String::new(),
            SummaryQuery::Month { year, month } => format!("?year={}&month={}", year, month),
            SummaryQuery::Range { start, end } => format!(
                "?start_date={}&end_date={}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

pub fn collection(kind: RecordKind) -> String {
    format!("/{}/", kind.slug())
}

pub fn item(kind: RecordKind, id: i64) -> String {
    format!("/{}/{}", kind.slug(), id)
}

pub fn summary(endpoint: SummaryEndpoint, query: &SummaryQuery) -> String {
    format!("{}{}", endpoint.path(), query.query_string())
}

pub fn login_form(username: &str, password: &str) -> String {
    format!(
        "username={}&password={}",
        urlencoding::encode(username),
        urlencoding::encode(password)
    )
}
