//! Request bodies sent to the Notion API.

use serde_json::{json, Value};

use super::properties::SelectOption;

pub const COMMENT_DB_TITLE: &str = "commentSubDB";

/// Users collection filter: `ID` and `PW` rich text columns must both match exactly.
pub fn credentials_filter(user_id: &str, user_pw: &str) -> Value {
    json!({
        "filter": {
            "and": [
                { "property": "ID", "rich_text": { "equals": user_id } },
                { "property": "PW", "rich_text": { "equals": user_pw } }
            ]
        }
    })
}

/// New notification / anonymous post row.
pub fn post_page(database_id: &str, title: &str, writer: &str, date: &str) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "title": { "title": [text(title)] },
            "writer": { "select": { "name": writer } },
            "date": { "date": { "start": date } }
        }
    })
}

/// Comment collection embedded under a post page.
pub fn comment_database(parent_page_id: &str) -> Value {
    json!({
        "parent": { "page_id": parent_page_id },
        "title": [{ "type": "text", "text": { "content": COMMENT_DB_TITLE } }],
        "properties": {
            "subWriter": { "title": {} },
            "text": { "rich_text": {} },
            "like": { "multi_select": {} }
        }
    })
}

pub fn paragraph_children(body: &str) -> Value {
    json!({
        "children": [{
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{ "type": "text", "text": { "content": body } }]
            }
        }]
    })
}

/// Comment row with an empty like set.
pub fn comment_row(database_id: &str, writer: &str, content: &str) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": {
            "subWriter": { "title": [text(writer)] },
            "text": { "rich_text": [text(content)] },
            "like": { "multi_select": [] }
        }
    })
}

pub fn like_update(likes: &[SelectOption]) -> Value {
    json!({ "properties": { "like": { "multi_select": likes } } })
}

pub fn archive() -> Value {
    json!({ "archived": true })
}

fn text(content: &str) -> Value {
    json!({ "text": { "content": content } })
}
