use serde_json::Value;
use tracing::info;

use super::archive::archive_page;
use crate::notion::{payloads, NotionClient, NotionError};

/// Rows of the comment collections embedded under posts.
pub struct CommentService {
    notion: NotionClient,
}

impl CommentService {
    pub fn new(notion: NotionClient) -> Self {
        Self { notion }
    }

    /// Create a comment row with an empty like set; returns the created page as sent back upstream
    pub async fn add(&self, database_id: &str, writer: &str, content: &str) -> Result<Value, NotionError> {
        let created = self
            .notion
            .create_page(&payloads::comment_row(database_id, writer, content))
            .await?;
        info!(database_id = %database_id, writer = %writer, "comment added");
        Ok(created)
    }

    pub async fn remove(&self, row_id: &str) -> Result<(), NotionError> {
        archive_page(&self.notion, row_id).await?;
        info!(row_id = %row_id, "comment archived");
        Ok(())
    }
}
