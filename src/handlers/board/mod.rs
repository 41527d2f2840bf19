// handlers/board/mod.rs - notification and anonymous post boards
//
// Both boards share these handlers. The router attaches the board's
// `BoardKind` as a request extension, so each handler serves whichever board
// its route belongs to.

use axum::{
    routing::{get, post},
    Extension, Router,
};

use crate::services::BoardKind;
use crate::state::AppState;

pub mod create;
pub mod delete;
pub mod page;
pub mod query;

pub use create::create_post;
pub use delete::delete_post;
pub use page::get_page;
pub use query::query_board;

/// Public paths of one board.
#[derive(Debug, Clone, Copy)]
pub struct BoardPaths {
    pub query: &'static str,
    pub page: &'static str,
    pub create: &'static str,
    pub delete: &'static str,
}

impl BoardPaths {
    pub fn for_kind(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Notification => Self {
                query: "/getNotificationDB",
                page: "/getNotificationPage/:page_id",
                create: "/createNotification",
                delete: "/deleteNotification/:page_id",
            },
            BoardKind::Anon => Self {
                query: "/getAnonDB",
                page: "/getAnonPage/:page_id",
                create: "/createAnon",
                delete: "/deleteAnon/:page_id",
            },
        }
    }
}

pub fn routes(kind: BoardKind) -> Router<AppState> {
    let paths = BoardPaths::for_kind(kind);

    Router::new()
        .route(paths.query, post(query_board))
        .route(paths.page, get(get_page))
        .route(paths.create, post(create_post))
        .route(paths.delete, post(delete_post))
        .layer(Extension(kind))
}
