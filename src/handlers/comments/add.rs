use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Detail};
use crate::middleware::{required, ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub comment_db_id: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddCommentResponse {
    /// Page object as returned by the upstream
    pub created: Value,
}

/// POST /addComment
pub async fn add_comment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AddCommentRequest>,
) -> ApiResult<AddCommentResponse> {
    let (Some(db_id), Some(writer), Some(content)) = (
        required(&payload.comment_db_id),
        required(&payload.writer),
        required(&payload.content),
    ) else {
        return Err(ApiError::bad_request("missing fields"));
    };

    state
        .comments()
        .add(db_id, writer, content)
        .await
        .map(|created| ApiResponse::success(AddCommentResponse { created }))
        .map_err(|e| ApiError::notion(e, Some(500), None, Detail::Text))
}
