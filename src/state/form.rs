//! Form values as the browser hands them over: strings, coerced on submit.

use serde_json::{Map, Number, Value};

use crate::format;
use crate::model::schema::{is_numeric_field, FieldInput, FieldSpec};

/// Leading-number parse, the way `parseFloat` reads an input's value:
/// `"12.5abc"` is 12.5, `"abc"` is nothing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let mut best = None;
    for (i, ch) in s.char_indices() {
        if !(ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+' | 'e' | 'E')) {
            break;
        }
        let end = i + ch.len_utf8();
        if let Ok(n) = s[..end].parse::<f64>() {
            best = Some(n);
        }
    }
    best.filter(|n| n.is_finite())
}

/// A number where one parses, JSON null otherwise (NaN serialises as null).
pub fn number_or_null(raw: &str) -> Value {
    parse_number(raw)
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// One input of a form, bound to its schema entry.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldValue {
    pub spec: FieldSpec,
    pub value: String,
}

impl FieldValue {
    pub fn new(spec: FieldSpec, value: impl Into<String>) -> Self {
        Self {
            spec,
            value: value.into(),
        }
    }

    pub fn from_json(spec: FieldSpec, value: Option<&Value>) -> Self {
        let text = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => format::number_text(n),
            Some(other) => other.to_string(),
        };
        Self::new(spec, text)
    }

    /// Placeholder option shown first in a select.
    pub fn placeholder(&self) -> Option<String> {
        match self.spec.input {
            FieldInput::Select(_) => Some(format!("Select {}", self.spec.label)),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.spec.required && self.value.trim().is_empty()
    }
}

/// Builds a request body: amount, revenue, hours and euro fields become
/// numbers, everything else is sent as typed.
pub fn payload(fields: &[FieldValue]) -> Map<String, Value> {
    fields
        .iter()
        .map(|f| {
            let value = if is_numeric_field(f.spec.name) {
                number_or_null(&f.value)
            } else {
                Value::String(f.value.clone())
            };
            (f.spec.name.to_string(), value)
        })
        .collect()
}

pub fn set_field(fields: &mut [FieldValue], name: &str, value: impl Into<String>) {
    if let Some(field) = fields.iter_mut().find(|f| f.spec.name == name) {
        field.value = value.into();
    }
}

#[cfg(test)]
pub fn field_value<'a>(fields: &'a [FieldValue], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.spec.name == name)
        .map(|f| f.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schema::fields_for;
    use crate::model::RecordKind;
    use serde_json::json;

    #[test]
    fn parse_number_reads_a_prefix() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number(" 7abc"), Some(7.0));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn payload_coerces_numeric_names() {
        let specs = fields_for(RecordKind::Income);
        let fields = vec![
            FieldValue::new(specs[0], "2024-05-01"),
            FieldValue::new(specs[1], "120.5"),
            FieldValue::new(specs[2], "not a number"),
            FieldValue::new(specs[3], "8"),
        ];
        let body = payload(&fields);
        assert_eq!(body["income_date"], json!("2024-05-01"));
        assert_eq!(body["tours_revenue_eur"], json!(120.5));
        assert_eq!(body["transfers_revenue_eur"], Value::Null);
        assert_eq!(body["hours_worked"], json!(8.0));
    }

    #[test]
    fn json_values_become_input_text() {
        let spec = fields_for(RecordKind::DailyExpenses)[0];
        assert_eq!(FieldValue::from_json(spec, Some(&json!(15.0))).value, "15");
        assert_eq!(FieldValue::from_json(spec, None).value, "");
    }
}
