use axum::{extract::State, Extension};
use serde::Deserialize;

use crate::error::{ApiError, Detail};
use crate::middleware::{required, ApiResponse, ApiResult, JsonBody};
use crate::notion::NotionError;
use crate::services::{BoardKind, CreateError, CreatedPost, NewPost};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub writer: Option<String>,
}

/// POST /createNotification, /createAnon
///
/// Three upstream calls: post page, comment collection, body paragraph. A
/// failure after the first call leaves the page behind; the error response
/// names the failed step and the page id.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(kind): Extension<BoardKind>,
    JsonBody(payload): JsonBody<CreatePostRequest>,
) -> ApiResult<CreatedPost> {
    let (Some(title), Some(writer)) = (required(&payload.title), required(&payload.writer)) else {
        return Err(ApiError::bad_request("missing fields"));
    };

    let post = NewPost {
        title: title.to_string(),
        writer: writer.to_string(),
        body: payload.body.clone().unwrap_or_default(),
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
    };

    state
        .board(kind)
        .create(&post)
        .await
        .map(ApiResponse::success)
        .map_err(create_error)
}

fn create_error(err: CreateError) -> ApiError {
    match err.source {
        source @ (NotionError::ConfigMissing(_) | NotionError::ConfigInvalid(_) | NotionError::InvalidId(_)) => {
            ApiError::notion(source, None, None, Detail::Json)
        }
        source => ApiError::PartialCreate {
            step: err.step.name(),
            page_id: err.page_id,
            detail: source.detail_json(),
        },
    }
}
