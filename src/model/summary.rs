use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Totals for one period. The backend names the keys after the period
/// (`net_monthly_profit`, `net_weekly_profit`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    #[serde(
        default,
        alias = "total_monthly_expenses",
        alias = "total_weekly_expenses",
        alias = "total_yearly_expenses"
    )]
    pub total_expenses: Option<f64>,
    #[serde(
        default,
        alias = "total_monthly_income",
        alias = "total_weekly_income",
        alias = "total_yearly_income"
    )]
    pub total_income: Option<f64>,
    #[serde(
        default,
        alias = "net_monthly_profit",
        alias = "net_weekly_profit",
        alias = "net_yearly_profit"
    )]
    pub net_profit: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    #[serde(default)]
    pub total_global_expenses: f64,
    #[serde(default)]
    pub total_global_income: f64,
    #[serde(default)]
    pub net_global_profit: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CashOnHand {
    #[serde(default)]
    pub doc_id: Option<i64>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Label/amount pairs from the category and source breakdown endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Breakdown(pub Vec<(String, f64)>);

impl Breakdown {
    /// Accepts an object of `label: amount` pairs. Non-numeric values are
    /// skipped.
    pub fn from_value(value: &Value) -> Self {
        let entries = match value {
            Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect(),
            _ => Vec::new(),
        };
        Breakdown(entries)
    }

    /// Moves the given labels to the front, in that order, keeping the rest
    /// behind them.
    pub fn prioritised(mut self, first: &[&str]) -> Self {
        let mut ordered = Vec::with_capacity(self.0.len());
        for label in first {
            if let Some(pos) = self.0.iter().position(|(k, _)| k == label) {
                ordered.push(self.0.remove(pos));
            }
        }
        ordered.append(&mut self.0);
        Breakdown(ordered)
    }
}

/// `{}` and `[]` both mean there is nothing to chart.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    }
}
