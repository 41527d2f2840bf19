use std::sync::Arc;

use crate::config::AppConfig;
use crate::notion::NotionClient;
use crate::services::{AuthService, BoardKind, BoardService, CommentService, ReactionService};

/// Shared per-process state handed to every handler. Holds no mutable data:
/// everything persistent lives upstream.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub notion: NotionClient,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let notion = NotionClient::new(Arc::new(config.notion.clone()));
        Self { config, notion }
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.notion.clone())
    }

    pub fn board(&self, kind: BoardKind) -> BoardService {
        BoardService::new(self.notion.clone(), kind)
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.notion.clone())
    }

    pub fn reactions(&self) -> ReactionService {
        ReactionService::new(self.notion.clone())
    }
}
