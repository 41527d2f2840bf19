use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use super::archive::archive_page;
use crate::config::NotionConfig;
use crate::notion::{
    blocks::{child_database, BlockSummary},
    client::is_valid_id,
    payloads, simplify_page, NotionClient, NotionError, SimplifiedPage,
};

/// The two post boards. They behave identically and differ only in the
/// collection their posts live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKind {
    Notification,
    Anon,
}

impl BoardKind {
    pub fn label(self) -> &'static str {
        match self {
            BoardKind::Notification => "notification",
            BoardKind::Anon => "anon",
        }
    }

    /// Environment variable naming the board's collection id
    pub fn env_var(self) -> &'static str {
        match self {
            BoardKind::Notification => "NOTION_NOTIFICATION_DB",
            BoardKind::Anon => "NOTION_ANON_DB",
        }
    }

    pub fn collection_id(self, config: &NotionConfig) -> Option<&str> {
        match self {
            BoardKind::Notification => config.notification_db.as_deref(),
            BoardKind::Anon => config.anon_db.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardListing {
    pub has_more: bool,
    pub next_cursor: Option<String>,
    pub items: Vec<SimplifiedPage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentCollection {
    pub db_id: String,
    pub db_name: String,
    pub items: Vec<SimplifiedPage>,
}

/// Composite read view of one post.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub page: SimplifiedPage,
    pub blocks: Vec<BlockSummary>,
    pub comment_dbs: Vec<CommentCollection>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub writer: String,
    pub body: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedPost {
    pub page_id: String,
    pub comment_db_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    Page,
    CommentDb,
    Body,
}

impl CreateStep {
    pub fn name(self) -> &'static str {
        match self {
            CreateStep::Page => "create_page",
            CreateStep::CommentDb => "create_comment_db",
            CreateStep::Body => "append_body",
        }
    }
}

/// A post creation that stopped part way. Steps before `step` stay committed
/// upstream; `page_id` names the page left behind, if one was created.
#[derive(Debug, Error)]
#[error("{} failed: {source}", .step.name())]
pub struct CreateError {
    pub step: CreateStep,
    pub page_id: Option<String>,
    #[source]
    pub source: NotionError,
}

pub struct BoardService {
    notion: NotionClient,
    kind: BoardKind,
}

impl BoardService {
    pub fn new(notion: NotionClient, kind: BoardKind) -> Self {
        Self { notion, kind }
    }

    fn collection_id(&self) -> Result<String, NotionError> {
        let id = self
            .kind
            .collection_id(self.notion.config())
            .ok_or(NotionError::ConfigMissing(self.kind.env_var()))?;
        if !is_valid_id(id) {
            return Err(NotionError::ConfigInvalid(self.kind.env_var()));
        }
        Ok(id.to_string())
    }

    /// Forward `query` (filter / sorts / start_cursor / page_size) to the
    /// board collection and simplify each row.
    pub async fn list(&self, query: &Value) -> Result<BoardListing, NotionError> {
        let collection_id = self.collection_id()?;
        let response = self.notion.query_database(&collection_id, query).await?;

        Ok(BoardListing {
            has_more: response.has_more,
            next_cursor: response.next_cursor,
            items: response.results.iter().map(simplify_page).collect(),
        })
    }

    /// Page metadata, its first 100 child blocks, and the rows of every child
    /// database among them. A comment collection that fails to load is logged
    /// and left out; page or block failures abort.
    pub async fn read_page(&self, page_id: &str) -> Result<PageView, NotionError> {
        let page = self.notion.retrieve_page(page_id).await?;
        let blocks = self.notion.list_block_children(page_id).await?;

        let mut comment_dbs = Vec::new();
        for (db_id, db_name) in blocks.iter().filter_map(child_database) {
            info!(board = self.kind.label(), db_id = %db_id, db_name = %db_name, "comment collection found");
            match self.notion.query_database(&db_id, &json!({})).await {
                Ok(rows) => comment_dbs.push(CommentCollection {
                    items: rows.results.iter().map(simplify_page).collect(),
                    db_id,
                    db_name,
                }),
                Err(err) => {
                    warn!(board = self.kind.label(), db_id = %db_id, error = %err, "skipping comment collection");
                }
            }
        }

        Ok(PageView {
            page: simplify_page(&page),
            blocks: blocks.iter().map(BlockSummary::from_block).collect(),
            comment_dbs,
        })
    }

    /// Create the post page, its comment collection, then its body paragraph.
    /// Nothing is rolled back when a later step fails.
    pub async fn create(&self, post: &NewPost) -> Result<CreatedPost, CreateError> {
        let collection_id = self.collection_id().map_err(|source| CreateError {
            step: CreateStep::Page,
            page_id: None,
            source,
        })?;

        let page = self
            .notion
            .create_page(&payloads::post_page(&collection_id, &post.title, &post.writer, &post.date))
            .await
            .and_then(|page| id_of(&page))
            .map_err(|source| CreateError {
                step: CreateStep::Page,
                page_id: None,
                source,
            })?;

        let orphaned = |step: CreateStep, source: NotionError| {
            warn!(
                board = self.kind.label(),
                page_id = %page,
                step = step.name(),
                error = %source,
                "post creation aborted, page left in place"
            );
            CreateError {
                step,
                page_id: Some(page.clone()),
                source,
            }
        };

        let comment_db_id = self
            .notion
            .create_database(&payloads::comment_database(&page))
            .await
            .and_then(|db| id_of(&db))
            .map_err(|e| orphaned(CreateStep::CommentDb, e))?;

        self.notion
            .append_block_children(&page, &payloads::paragraph_children(&post.body))
            .await
            .map_err(|e| orphaned(CreateStep::Body, e))?;

        info!(board = self.kind.label(), page_id = %page, comment_db_id = %comment_db_id, "post created");
        Ok(CreatedPost {
            page_id: page,
            comment_db_id,
        })
    }

    pub async fn archive(&self, page_id: &str) -> Result<(), NotionError> {
        archive_page(&self.notion, page_id).await?;
        info!(board = self.kind.label(), page_id = %page_id, "post archived");
        Ok(())
    }
}

fn id_of(created: &Value) -> Result<String, NotionError> {
    created
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| NotionError::Decode("created object has no id".to_string()))
}
