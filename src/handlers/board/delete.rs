use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::Value;

use crate::error::{ApiError, Detail};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::BoardKind;
use crate::state::AppState;

/// POST /deleteNotification/:page_id, /deleteAnon/:page_id
///
/// Soft delete: the page is archived upstream.
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(kind): Extension<BoardKind>,
    Path(page_id): Path<String>,
) -> ApiResult<Value> {
    state
        .board(kind)
        .archive(&page_id)
        .await
        .map(|()| ApiResponse::ok())
        .map_err(|e| ApiError::notion(e, Some(400), Some("notion_error"), Detail::Json))
}
