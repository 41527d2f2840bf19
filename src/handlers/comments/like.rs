use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Detail};
use crate::middleware::{required, ApiResponse, ApiResult, JsonBody};
use crate::notion::SelectOption;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PostLikeRequest {
    #[serde(default)]
    pub comment_db_id: Option<String>,
    #[serde(default)]
    pub content_like_row_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentLikeRequest {
    #[serde(default)]
    pub comment_row_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LikesResponse {
    pub likes: Vec<SelectOption>,
}

/// POST /togglePostLike
///
/// A post's likes live on a dedicated row of its comment collection
/// (`content_like_row_id`). The collection id is required but the row alone
/// is updated.
pub async fn toggle_post_like(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PostLikeRequest>,
) -> ApiResult<LikesResponse> {
    let (Some(_), Some(row_id), Some(user)) = (
        required(&payload.comment_db_id),
        required(&payload.content_like_row_id),
        required(&payload.user_name),
    ) else {
        return Err(ApiError::bad_request("missing fields"));
    };

    toggle(&state, row_id, user).await
}

/// POST /toggleCommentLike
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CommentLikeRequest>,
) -> ApiResult<LikesResponse> {
    let (Some(row_id), Some(user)) = (required(&payload.comment_row_id), required(&payload.user_name)) else {
        return Err(ApiError::bad_request("missing fields"));
    };

    toggle(&state, row_id, user).await
}

async fn toggle(state: &AppState, row_id: &str, user: &str) -> ApiResult<LikesResponse> {
    state
        .reactions()
        .toggle_like(row_id, user)
        .await
        .map(|likes| ApiResponse::success(LikesResponse { likes }))
        .map_err(|e| ApiError::notion(e, Some(500), None, Detail::Text))
}
