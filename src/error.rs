use serde_json::Value;
use thiserror::Error;

use crate::model::record::RecordKind;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("{}", http_message(.status, .status_text, .detail))]
    Http {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },

    #[error("{0}")]
    Validation(String),

    /// The target row is not part of the last loaded dataset.
    #[error("Entry not found for editing.")]
    NotFound { kind: RecordKind, id: i64 },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The chart library refused a canvas or a config.
    #[error("Chart error: {0}")]
    Render(String),
}

impl AppError {
    pub fn http(status: u16, status_text: impl Into<String>, body: Option<&Value>) -> Self {
        AppError::Http {
            status,
            status_text: status_text.into(),
            detail: body.and_then(detail_message),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

fn http_message(status: &u16, status_text: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => detail.clone(),
        _ if !status_text.is_empty() => status_text.to_string(),
        _ => format!("HTTP error! status: {}", status),
    }
}

/// Pulls the human readable part out of a FastAPI error body.
///
/// `detail` is either a plain string or a list of validation entries, each
/// with a `msg` and a `loc` path.
pub fn detail_message(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg").and_then(Value::as_str)?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(match field {
                        Some(field) => format!("{}: {}", field, msg),
                        None => msg.to_string(),
                    })
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
