// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};

use crate::notion::NotionError;

/// HTTP API error. Every variant renders with `"success": false` so clients
/// can branch on one field.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error (required environment value unset or malformed)
    Misconfigured(String),

    // Upstream failure relayed with a route-specific status
    Upstream {
        status: u16,
        reason: Option<String>,
        detail: Value,
    },

    // 400 Multi-step create aborted; earlier steps stay committed upstream
    PartialCreate {
        step: &'static str,
        page_id: Option<String>,
        detail: Value,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

/// How an upstream failure body is passed through to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// raw body text
    Text,
    /// body parsed as JSON
    Json,
    /// `{status, detail}` wrapper around the raw body
    Envelope,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Misconfigured(_) => 500,
            ApiError::Upstream { status, .. } => *status,
            ApiError::PartialCreate { .. } => 400,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Client-facing reason, if the variant carries one
    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(msg) => Some(msg),
            ApiError::InvalidJson(msg) => Some(msg),
            ApiError::Unauthorized(msg) => Some(msg),
            ApiError::Misconfigured(msg) => Some(msg),
            ApiError::Upstream { reason, .. } => reason.as_deref(),
            ApiError::PartialCreate { step, .. } => Some(step),
            ApiError::InternalServerError(msg) => Some(msg),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        if let Some(reason) = self.reason() {
            body.insert("reason".into(), json!(reason));
        }

        match self {
            ApiError::Upstream { detail, .. } => {
                body.insert("detail".into(), detail.clone());
            }
            ApiError::PartialCreate { step, page_id, detail } => {
                body.insert("step".into(), json!(step));
                if let Some(page_id) = page_id {
                    body.insert("page_id".into(), json!(page_id));
                }
                body.insert("detail".into(), detail.clone());
            }
            _ => {}
        }

        Value::Object(body)
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn config_missing(variable: &str) -> Self {
        ApiError::Misconfigured(format!("{} is not set", variable))
    }

    pub fn config_invalid(variable: &str) -> Self {
        ApiError::Misconfigured(format!("{} is not a valid id", variable))
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    /// Map an upstream failure. `status` overrides the upstream status code
    /// (None relays it). Local failures keep their own mapping: missing config
    /// is a 500, a malformed id a 400, and no answer at all a 502.
    pub fn notion(err: NotionError, status: Option<u16>, reason: Option<&str>, detail: Detail) -> Self {
        let rendered = match detail {
            Detail::Text => err.detail_text(),
            Detail::Json => err.detail_json(),
            Detail::Envelope => err.detail_envelope(),
        };

        match err {
            NotionError::ConfigMissing(variable) => ApiError::config_missing(variable),
            NotionError::ConfigInvalid(variable) => ApiError::config_invalid(variable),
            NotionError::InvalidId(_) => ApiError::bad_request(err.to_string()),
            NotionError::Status { status: upstream, .. } => ApiError::Upstream {
                status: status.unwrap_or(upstream),
                reason: reason.map(str::to_string),
                detail: rendered,
            },
            NotionError::Transport(_) | NotionError::Decode(_) => ApiError::Upstream {
                status: 502,
                reason: Some(reason.map(str::to_string).unwrap_or_else(|| err.to_string())),
                detail: rendered,
            },
        }
    }
}

impl From<NotionError> for ApiError {
    fn from(err: NotionError) -> Self {
        ApiError::notion(err, None, None, Detail::Json)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({})", reason, self.status_code()),
            None => write!(f, "upstream error ({})", self.status_code()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
