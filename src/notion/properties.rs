//! Flattening of Notion's typed page properties.
//!
//! Notion encodes every page property as `{"type": "<kind>", "<kind>": <payload>}`.
//! [`PropertyValue`] covers the kinds this service reads; anything else lands in
//! [`PropertyValue::Unsupported`]. Every extractor here is total: malformed or
//! missing shapes degrade to empty strings, never to an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property kinds recognised by [`PropertyValue::infer`] when a payload carries
/// no `type` tag, in lookup order.
const UNTAGGED_KINDS: [&str; 5] = ["title", "rich_text", "select", "multi_select", "date"];

/// An option of a select / multi-select property. Unknown fields from the
/// upstream (`id`, `color`) are kept so they can be written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<String>),
    RichText(Vec<String>),
    People(Vec<String>),
    MultiSelect(Vec<SelectOption>),
    Select(Option<SelectOption>),
    Date(Option<String>),
    Unsupported,
}

impl PropertyValue {
    /// Classify a raw property by its declared `type` tag alone. Untagged
    /// payloads are `Unsupported`.
    pub fn from_json(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return PropertyValue::Unsupported;
        };
        Self::of_kind(obj, obj.get("type").and_then(Value::as_str))
    }

    /// Like [`from_json`](Self::from_json), but an untagged payload is
    /// classified by the first known payload key it carries.
    pub fn infer(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return PropertyValue::Unsupported;
        };

        let kind = match obj.get("type") {
            Some(tag) => tag.as_str(),
            None => UNTAGGED_KINDS
                .iter()
                .copied()
                .find(|kind| obj.contains_key(*kind)),
        };
        Self::of_kind(obj, kind)
    }

    fn of_kind(obj: &Map<String, Value>, kind: Option<&str>) -> Self {
        match kind {
            Some("title") => PropertyValue::Title(fragments(obj.get("title"))),
            Some("rich_text") => PropertyValue::RichText(fragments(obj.get("rich_text"))),
            Some("people") => PropertyValue::People(
                array(obj.get("people"))
                    .map(|person| str_field(person, "name"))
                    .collect(),
            ),
            Some("multi_select") => PropertyValue::MultiSelect(options(obj.get("multi_select"))),
            Some("select") => PropertyValue::Select(obj.get("select").and_then(option)),
            Some("date") => PropertyValue::Date(
                obj.get("date")
                    .filter(|d| d.is_object())
                    .map(|d| str_field(d, "start")),
            ),
            _ => PropertyValue::Unsupported,
        }
    }

    /// Text shown for a title or rich text property; select falls back to its option name.
    pub fn plain_text(&self) -> String {
        match self {
            PropertyValue::Title(parts) | PropertyValue::RichText(parts) => parts.concat(),
            PropertyValue::Select(Some(opt)) => opt.name.clone(),
            _ => String::new(),
        }
    }

    /// Writer dispatch: people and multi-select join names with ", ", rich text
    /// concatenates, select yields its option name.
    pub fn writer_text(&self) -> String {
        match self {
            PropertyValue::People(names) => names.join(", "),
            PropertyValue::MultiSelect(opts) => opts
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            PropertyValue::RichText(parts) => parts.concat(),
            PropertyValue::Select(Some(opt)) => opt.name.clone(),
            _ => String::new(),
        }
    }
}

/// Page flattened for the frontend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedPage {
    pub id: Option<String>,
    pub title: String,
    pub writer: String,
    pub date: String,
    pub created_time: Option<String>,
    pub last_edited_time: Option<String>,
    pub archived: bool,
    pub properties: Value,
}

pub fn simplify_page(page: &Value) -> SimplifiedPage {
    let props = page
        .get("properties")
        .filter(|p| p.is_object())
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));

    let title = match props.get("title").map(PropertyValue::infer) {
        Some(PropertyValue::Title(parts)) => parts.concat(),
        _ => String::new(),
    };
    let writer = props
        .get("writer")
        .map(|w| PropertyValue::from_json(w).writer_text())
        .unwrap_or_default();
    let date = match props.get("date").map(PropertyValue::infer) {
        Some(PropertyValue::Date(Some(start))) => start,
        _ => String::new(),
    };

    SimplifiedPage {
        id: opt_str(page, "id"),
        title,
        writer,
        date,
        created_time: opt_str(page, "created_time"),
        last_edited_time: opt_str(page, "last_edited_time"),
        archived: page.get("archived").and_then(Value::as_bool).unwrap_or(false),
        properties: props,
    }
}

/// Plain text of the named property on a page, or empty.
pub fn property_text(page: &Value, name: &str) -> String {
    page.get("properties")
        .and_then(|p| p.get(name))
        .map(|p| PropertyValue::infer(p).plain_text())
        .unwrap_or_default()
}

/// Options of the named multi-select property; anything else reads as empty.
pub fn multi_select(page: &Value, name: &str) -> Vec<SelectOption> {
    match page
        .get("properties")
        .and_then(|p| p.get(name))
        .map(PropertyValue::infer)
    {
        Some(PropertyValue::MultiSelect(opts)) => opts,
        _ => Vec::new(),
    }
}

/// Concatenated `plain_text` of a rich text array.
pub fn fragments_text(raw: Option<&Value>) -> String {
    fragments(raw).concat()
}

fn fragments(raw: Option<&Value>) -> Vec<String> {
    array(raw).map(|frag| str_field(frag, "plain_text")).collect()
}

fn options(raw: Option<&Value>) -> Vec<SelectOption> {
    array(raw).filter_map(option).collect()
}

fn option(raw: &Value) -> Option<SelectOption> {
    let obj = raw.as_object()?;
    let name = obj.get("name").and_then(Value::as_str).unwrap_or_default();
    let extra = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "name")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Some(SelectOption {
        name: name.to_string(),
        extra,
    })
}

fn array(raw: Option<&Value>) -> impl Iterator<Item = &Value> {
    raw.and_then(Value::as_array).into_iter().flatten()
}

fn str_field(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_str(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}
