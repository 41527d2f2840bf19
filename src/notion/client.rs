use std::sync::Arc;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::error::NotionError;
use crate::config::NotionConfig;

/// Children fetched per page of `GET /blocks/{id}/children`. Later pages are not requested.
pub const BLOCK_PAGE_SIZE: u32 = 100;

/// One page of a collection query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockChildren {
    #[serde(default)]
    results: Vec<Value>,
}

/// Thin client over the Notion REST API.
///
/// Every request is bearer-authenticated and pinned to the configured
/// `Notion-Version`. There is no timeout, retry or backoff: a failure surfaces
/// to the caller as soon as it happens.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: Arc<NotionConfig>,
}

impl NotionClient {
    pub fn new(config: Arc<NotionConfig>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("notion-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// POST /databases/{id}/query, forwarding the query object verbatim
    pub async fn query_database(
        &self,
        database_id: &str,
        query: &Value,
    ) -> Result<QueryResponse, NotionError> {
        let raw = self.query_database_raw(database_id, query).await?;
        decode(raw)
    }

    /// Same as [`query_database`](Self::query_database) but keeps the whole response body
    pub async fn query_database_raw(&self, database_id: &str, query: &Value) -> Result<Value, NotionError> {
        let path = format!("/databases/{}/query", checked_id(database_id)?);
        self.send(Method::POST, &path, Some(query)).await
    }

    pub async fn retrieve_page(&self, page_id: &str) -> Result<Value, NotionError> {
        let path = format!("/pages/{}", checked_id(page_id)?);
        self.send(Method::GET, &path, None).await
    }

    pub async fn update_page(&self, page_id: &str, payload: &Value) -> Result<Value, NotionError> {
        let path = format!("/pages/{}", checked_id(page_id)?);
        self.send(Method::PATCH, &path, Some(payload)).await
    }

    pub async fn create_page(&self, payload: &Value) -> Result<Value, NotionError> {
        self.send(Method::POST, "/pages", Some(payload)).await
    }

    pub async fn create_database(&self, payload: &Value) -> Result<Value, NotionError> {
        self.send(Method::POST, "/databases", Some(payload)).await
    }

    /// First page of a block's children, at most [`BLOCK_PAGE_SIZE`] entries
    pub async fn list_block_children(&self, block_id: &str) -> Result<Vec<Value>, NotionError> {
        let path = format!(
            "/blocks/{}/children?page_size={}",
            checked_id(block_id)?,
            BLOCK_PAGE_SIZE
        );
        let raw = self.send(Method::GET, &path, None).await?;
        decode::<BlockChildren>(raw).map(|children| children.results)
    }

    pub async fn append_block_children(
        &self,
        block_id: &str,
        children: &Value,
    ) -> Result<Value, NotionError> {
        let path = format!("/blocks/{}/children", checked_id(block_id)?);
        self.send(Method::PATCH, &path, Some(children)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, NotionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NotionError::ConfigMissing("NOTION_API_KEY"))?;

        let url = format!("{}{}", self.config.base_url, path);
        debug!(method = %method, path = %path, "notion request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(api_key)
            .header("Notion-Version", self.config.version.as_str());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(method = %method, path = %path, status = status.as_u16(), "notion request failed");
            return Err(NotionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(json!({}));
        }
        serde_json::from_str(&text).map_err(|e| NotionError::Decode(e.to_string()))
    }
}

fn decode<T: serde::de::DeserializeOwned>(raw: Value) -> Result<T, NotionError> {
    serde_json::from_value(raw).map_err(|e| NotionError::Decode(e.to_string()))
}

/// Ids are spliced into URL paths, so only UUID-ish characters are accepted.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn checked_id(id: &str) -> Result<&str, NotionError> {
    if is_valid_id(id) {
        Ok(id)
    } else {
        Err(NotionError::InvalidId(id.to_string()))
    }
}
