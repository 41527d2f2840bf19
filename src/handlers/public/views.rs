use axum::{
    http::Uri,
    response::{Html, Json},
};
use serde_json::{json, Value};

const LOGIN_HTML: &str = include_str!("../../../templates/login.html");
const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// GET /, /login.html, /login
pub async fn login_view() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// GET /main
pub async fn main_view() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Anything unrouted goes to the single-page app, except the login page.
pub async fn spa_fallback(uri: Uri) -> Html<&'static str> {
    tracing::debug!(path = %uri.path(), "spa fallback");
    if uri.path().trim_matches('/') == "login" {
        Html(LOGIN_HTML)
    } else {
        Html(INDEX_HTML)
    }
}
