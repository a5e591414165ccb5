use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three collections the backend exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Income,
    DailyExpenses,
    FixedCosts,
}

impl RecordKind {
    /// Order used by the cross-collection search.
    pub const SEARCH_ORDER: [RecordKind; 3] = [
        RecordKind::DailyExpenses,
        RecordKind::FixedCosts,
        RecordKind::Income,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::DailyExpenses => "daily-expenses",
            RecordKind::FixedCosts => "fixed-costs",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "income" => Some(RecordKind::Income),
            "daily-expenses" => Some(RecordKind::DailyExpenses),
            "fixed-costs" => Some(RecordKind::FixedCosts),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::DailyExpenses => "Daily Expenses",
            RecordKind::FixedCosts => "Fixed Costs",
        }
    }

    /// Name used in registration banners ("Daily Expense registered ...").
    pub fn singular(self) -> &'static str {
        match self {
            RecordKind::Income => "Income",
            RecordKind::DailyExpenses => "Daily Expense",
            RecordKind::FixedCosts => "Fixed Cost",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A row as the backend returns it. Fields stay opaque apart from the keys
/// used for dates, ids, sorting and formatting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn id(&self) -> Option<i64> {
        match self.0.get("doc_id")? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn date_str(&self) -> Option<&str> {
        ["cost_date", "income_date"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
            .filter(|s| !s.is_empty())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date_str().and_then(parse_iso_date)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Record(map),
            _ => Record::default(),
        }
    }
}

/// A record together with the collection it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedRecord {
    pub source: RecordKind,
    pub record: Record,
}

impl TaggedRecord {
    pub fn new(source: RecordKind, record: Record) -> Self {
        Self { source, record }
    }

    pub fn id(&self) -> Option<i64> {
        self.record.id()
    }

    pub fn is(&self, id: i64, kind: RecordKind) -> bool {
        self.source == kind && self.id() == Some(id)
    }
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Newest first; equal dates fall back to the higher id first. Rows without a
/// readable date sort last.
pub fn newest_first(a: &Record, b: &Record) -> Ordering {
    match (a.date(), b.date()) {
        (Some(da), Some(db)) if da != db => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => b.id().unwrap_or(i64::MIN).cmp(&a.id().unwrap_or(i64::MIN)),
    }
}
