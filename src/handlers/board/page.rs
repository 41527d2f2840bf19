use axum::{
    extract::{Path, State},
    Extension,
};

use crate::error::{ApiError, Detail};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{BoardKind, PageView};
use crate::state::AppState;

/// GET /getNotificationPage/:page_id, /getAnonPage/:page_id
///
/// Page metadata, body blocks and embedded comment collections. Upstream
/// failures keep the upstream status and raw body.
pub async fn get_page(
    State(state): State<AppState>,
    Extension(kind): Extension<BoardKind>,
    Path(page_id): Path<String>,
) -> ApiResult<PageView> {
    state
        .board(kind)
        .read_page(&page_id)
        .await
        .map(ApiResponse::success)
        .map_err(|e| ApiError::notion(e, None, None, Detail::Text))
}
