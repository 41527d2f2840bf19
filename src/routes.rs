use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::error::ApiError;
use crate::handlers::{board, comments, public};
use crate::services::BoardKind;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        // Views
        .route("/", get(public::login_view))
        .route("/login.html", get(public::login_view))
        .route("/main", get(public::main_view))
        .route("/health", get(public::health))
        // Login
        .route("/login", get(public::login_view).post(public::login))
        // Boards
        .merge(board::routes(BoardKind::Notification))
        .merge(board::routes(BoardKind::Anon))
        // Comments and likes
        .merge(comments::routes())
        // Static assets, then the single-page app for everything else
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(public::spa_fallback)
        .with_state(state)
        // Global middleware
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Handler panics become a 500 with the panic message as `reason`.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unexpected error".to_string()
    };
    tracing::error!(reason = %reason, "handler panicked");
    ApiError::internal_server_error(reason).into_response()
}
