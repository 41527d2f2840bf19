use serde::Serialize;
use serde_json::Value;

use super::properties::fragments_text;

pub const CHILD_DATABASE: &str = "child_database";

/// One content block reduced to its visible text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
}

impl BlockSummary {
    pub fn from_block(block: &Value) -> Self {
        Self {
            id: str_of(block, "id"),
            block_type: str_of(block, "type"),
            text: block_text(block),
        }
    }
}

/// Rich text carried under the block's own type key, e.g. `paragraph.rich_text`.
pub fn block_text(block: &Value) -> String {
    let content = block
        .get("type")
        .and_then(Value::as_str)
        .and_then(|kind| block.get(kind));
    fragments_text(content.and_then(|c| c.get("rich_text")))
}

/// `(id, title)` of a block that embeds a child database.
pub fn child_database(block: &Value) -> Option<(String, String)> {
    if block.get("type").and_then(Value::as_str) != Some(CHILD_DATABASE) {
        return None;
    }
    let id = block.get("id").and_then(Value::as_str)?;
    let title = block
        .get(CHILD_DATABASE)
        .map(|db| str_of(db, "title"))
        .unwrap_or_default();
    Some((id.to_string(), title))
}

fn str_of(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
