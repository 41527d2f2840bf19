// handlers/comments/mod.rs - comment rows and likes on posts and comments

use axum::{routing::post, Router};

use crate::state::AppState;

pub mod add;
pub mod delete;
pub mod like;

pub use add::add_comment;
pub use delete::delete_comment;
pub use like::{toggle_comment_like, toggle_post_like};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/togglePostLike", post(toggle_post_like))
        .route("/toggleCommentLike", post(toggle_comment_like))
        .route("/addComment", post(add_comment))
        .route("/deleteComment", post(delete_comment))
}
