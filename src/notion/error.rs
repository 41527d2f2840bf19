use serde_json::{json, Value};
use thiserror::Error;

/// Failures talking to the Notion API.
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("{0} is not set")]
    ConfigMissing(&'static str),

    #[error("{0} is not a valid id")]
    ConfigInvalid(&'static str),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("notion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("notion returned HTTP {status}")]
    Status { status: u16, body: String },

    #[error("invalid notion response: {0}")]
    Decode(String),
}

impl NotionError {
    /// Upstream HTTP status, when the upstream answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            NotionError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw upstream body as a JSON string, or the error message
    pub fn detail_text(&self) -> Value {
        match self {
            NotionError::Status { body, .. } => Value::String(body.clone()),
            other => Value::String(other.to_string()),
        }
    }

    /// Upstream body parsed as JSON when possible, otherwise `{"error": message}`
    pub fn detail_json(&self) -> Value {
        match self {
            NotionError::Status { body, .. } => {
                serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
            }
            other => json!({ "error": other.to_string() }),
        }
    }

    /// `{status, detail}` envelope for upstream answers, `{error}` otherwise
    pub fn detail_envelope(&self) -> Value {
        match self {
            NotionError::Status { status, body } => json!({ "status": status, "detail": body }),
            other => json!({ "error": other.to_string() }),
        }
    }
}
