//! Notion API access: HTTP client, upstream errors, and the translation between
//! Notion's page/block representation and the flat records the frontend reads.

pub mod blocks;
pub mod client;
pub mod error;
pub mod payloads;
pub mod properties;

pub use blocks::BlockSummary;
pub use client::{NotionClient, QueryResponse};
pub use error::NotionError;
pub use properties::{simplify_page, PropertyValue, SelectOption, SimplifiedPage};
