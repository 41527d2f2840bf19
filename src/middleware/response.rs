use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Successful API response. The payload's fields are merged into a flat
/// object next to `"success": true`, so `T` must serialize to a JSON object.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl ApiResponse<Value> {
    /// `{"success": true}` and nothing else
    pub fn ok() -> Self {
        Self::success(json!({}))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = match serde_json::to_value(&self.data) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                tracing::error!("Response payload is not a JSON object: {}", other);
                return failure("Response payload is not a JSON object");
            }
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return failure("Failed to serialize response data");
            }
        };
        envelope.insert("success".into(), Value::Bool(true));

        (StatusCode::OK, Json(Value::Object(envelope))).into_response()
    }
}

fn failure(reason: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "reason": reason })),
    )
        .into_response()
}

// Convenience type aliases
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
