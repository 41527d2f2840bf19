// handlers/public/login.rs - POST /login
//
// Plaintext credential check against the users collection. Responses:
//   200 {success: true, user_name, user_role, page_id}
//   400 {success: false, reason: "ID/PW required"}
//   401 {success: false, reason: "mismatch"}

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub pw: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_name: String,
    pub user_role: String,
    pub page_id: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user_id = payload.id.as_deref().unwrap_or_default().trim();
    let user_pw = payload.pw.as_deref().unwrap_or_default().trim();

    if user_id.is_empty() || user_pw.is_empty() {
        return Err(ApiError::bad_request("ID/PW required"));
    }

    match state.auth().verify(user_id, user_pw).await? {
        Some(user) => {
            info!(user_id = %user_id, user_name = %user.user_name, "login succeeded");
            Ok(ApiResponse::success(LoginResponse {
                user_name: user.user_name,
                user_role: user.user_role,
                page_id: user.page_id,
            }))
        }
        None => {
            warn!(user_id = %user_id, "login rejected");
            Err(ApiError::unauthorized("mismatch"))
        }
    }
}
