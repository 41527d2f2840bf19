pub mod archive;
pub mod auth_service;
pub mod board_service;
pub mod comment_service;
pub mod reaction_service;

pub use auth_service::{AuthService, CredentialLookup, UserRecord};
pub use board_service::{BoardKind, BoardService, CreateError, CreateStep, CreatedPost, NewPost, PageView};
pub use comment_service::CommentService;
pub use reaction_service::ReactionService;
