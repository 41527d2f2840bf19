use axum::{extract::State, Extension};

use crate::error::{ApiError, Detail};
use crate::middleware::{ApiResponse, ApiResult, QueryBody};
use crate::services::{board_service::BoardListing, BoardKind};
use crate::state::AppState;

/// POST /getNotificationDB, /getAnonDB
///
/// The body, if it is a JSON object, is forwarded as the Notion query
/// (filter, sorts, start_cursor, page_size). Rows come back simplified.
pub async fn query_board(
    State(state): State<AppState>,
    Extension(kind): Extension<BoardKind>,
    QueryBody(query): QueryBody,
) -> ApiResult<BoardListing> {
    state
        .board(kind)
        .list(&query)
        .await
        .map(ApiResponse::success)
        .map_err(|e| ApiError::notion(e, Some(502), Some("notion_query_failed"), Detail::Envelope))
}
