//! Display formatting shared by the record browser and the dashboard.

use serde_json::Value;

use crate::config::MOBILE_BREAKPOINT_PX;
use crate::model::record::parse_iso_date;

/// Width of the window at render time. Narrow viewports get compact dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    pub fn desktop() -> Self {
        Self { width: 1280 }
    }

    pub fn is_mobile(self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }

    /// Reads `window.innerWidth`, assuming a desktop when it is unavailable.
    pub fn current() -> Self {
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .map(|w| Self::new(w.max(0.0) as u32))
            .unwrap_or_else(Self::desktop)
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let chars: Vec<char> = digits.chars().rev().collect();
    let mut out = Vec::with_capacity(chars.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(sep);
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Euro amount in French notation: `1 234,50 €`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00 €".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{} €", sign, group_thousands(int_part, ' '), frac_part)
}

/// Formats a JSON value as currency. Anything that is not a number renders
/// as `0.00 €`.
pub fn currency_value(value: Option<&Value>) -> String {
    match value.and_then(Value::as_f64) {
        Some(n) => currency(n),
        None => "0.00 €".to_string(),
    }
}

/// `02 January 2024` on wide screens, `02/01/24` on narrow ones.
pub fn date(iso: &str, viewport: Viewport) -> String {
    if iso.trim().is_empty() {
        return "-".to_string();
    }
    match parse_iso_date(iso) {
        Some(d) if viewport.is_mobile() => d.format("%d/%m/%y").to_string(),
        Some(d) => d.format("%d %B %Y").to_string(),
        None => iso.to_string(),
    }
}

/// Enumerated values are stored with underscores in some rows.
pub fn enum_label(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.replace('_', " "),
        _ => "-".to_string(),
    }
}

/// `daily-expenses` -> `Daily Expenses`.
pub fn kind_title(slug: &str) -> String {
    slug.split(|c| c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Share of `total` with one decimal, as shown on pie slices.
pub fn percentage(value: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}%", value / total * 100.0)
    } else {
        "0%".to_string()
    }
}

/// Text form of a scalar the way a browser prints it: integral numbers
/// without a fractional part, strings as-is.
pub fn plain(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_text(n),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        // f64's Display drops a trailing ".0", matching JS String(number).
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}
