use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Detail};
use crate::middleware::{required, ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteCommentRequest {
    #[serde(default)]
    pub comment_row_id: Option<String>,
}

/// POST /deleteComment - archives the comment row
pub async fn delete_comment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<DeleteCommentRequest>,
) -> ApiResult<Value> {
    let Some(row_id) = required(&payload.comment_row_id) else {
        return Err(ApiError::bad_request("missing comment_row_id"));
    };

    state
        .comments()
        .remove(row_id)
        .await
        .map(|()| ApiResponse::ok())
        .map_err(|e| ApiError::notion(e, Some(500), None, Detail::Text))
}
