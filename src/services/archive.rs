use serde_json::Value;
use tracing::{debug, warn};

use crate::notion::{payloads, NotionClient, NotionError};

/// Soft-delete a page by setting `archived = true`.
///
/// The upstream refuses to edit a page that is already archived. When the
/// update is rejected the page is re-read, and an already archived page counts
/// as success, so archiving twice succeeds twice.
pub async fn archive_page(notion: &NotionClient, page_id: &str) -> Result<(), NotionError> {
    let err = match notion.update_page(page_id, &payloads::archive()).await {
        Ok(_) => return Ok(()),
        Err(err @ NotionError::Status { .. }) => err,
        Err(err) => return Err(err),
    };

    match notion.retrieve_page(page_id).await {
        Ok(page) if page.get("archived").and_then(Value::as_bool) == Some(true) => {
            debug!(page_id = %page_id, "page already archived");
            Ok(())
        }
        Ok(_) => Err(err),
        Err(lookup_err) => {
            warn!(page_id = %page_id, error = %lookup_err, "archive re-check failed");
            Err(err)
        }
    }
}
