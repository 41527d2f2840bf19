use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::notion::{client::is_valid_id, payloads, properties::property_text, NotionClient, NotionError};

/// A row of the users collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub page_id: Option<String>,
    pub user_name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(skip_serializing)]
    pub pw: String,
    pub user_role: String,
}

impl UserRecord {
    fn from_page(page: &Value) -> Self {
        Self {
            page_id: page.get("id").and_then(Value::as_str).map(str::to_string),
            user_name: property_text(page, "user_name"),
            id: property_text(page, "ID"),
            pw: property_text(page, "PW"),
            user_role: property_text(page, "user_role"),
        }
    }
}

/// Result of a credential lookup: the first matching row, if any, plus the
/// upstream response (or `{"error": ...}`) it was taken from.
#[derive(Debug, Clone)]
pub struct CredentialLookup {
    pub user: Option<UserRecord>,
    pub raw: Value,
}

impl CredentialLookup {
    fn failed(raw: Value) -> Self {
        Self { user: None, raw }
    }
}

pub struct AuthService {
    notion: NotionClient,
}

impl AuthService {
    pub fn new(notion: NotionClient) -> Self {
        Self { notion }
    }

    /// Query the users collection for a row whose `ID` and `PW` columns equal
    /// the given values. Only the first row is used; when several rows match,
    /// which one comes first is up to the upstream ordering.
    ///
    /// Empty credentials fail without contacting the upstream. Transport and
    /// upstream failures are folded into the returned `raw` value; only
    /// configuration problems are returned as errors.
    pub async fn lookup(&self, user_id: &str, user_pw: &str) -> Result<CredentialLookup, NotionError> {
        if user_id.is_empty() || user_pw.is_empty() {
            return Ok(CredentialLookup::failed(json!({ "error": "empty credentials" })));
        }

        let users_db = self
            .notion
            .config()
            .users_db
            .clone()
            .ok_or(NotionError::ConfigMissing("NOTION_DB_ID"))?;
        if !is_valid_id(&users_db) {
            return Err(NotionError::ConfigInvalid("NOTION_DB_ID"));
        }

        let filter = payloads::credentials_filter(user_id, user_pw);
        let raw = match self.notion.query_database_raw(&users_db, &filter).await {
            Ok(raw) => raw,
            Err(err @ (NotionError::ConfigMissing(_) | NotionError::ConfigInvalid(_))) => return Err(err),
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "credential lookup failed");
                let raw = match &err {
                    NotionError::Status { .. } => err.detail_json(),
                    _ => json!({ "error": err.to_string() }),
                };
                return Ok(CredentialLookup::failed(raw));
            }
        };

        let first = raw
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| {
                info!(user_id = %user_id, matches = results.len(), "credential lookup");
                results.first()
            })
            .map(UserRecord::from_page);

        Ok(CredentialLookup { user: first, raw })
    }

    /// Lookup followed by an exact comparison of the returned `ID`/`PW`
    /// against the submitted values, so a loose upstream match never logs a
    /// user in.
    pub async fn verify(&self, user_id: &str, user_pw: &str) -> Result<Option<UserRecord>, NotionError> {
        let lookup = self.lookup(user_id, user_pw).await?;
        Ok(lookup
            .user
            .filter(|user| user.id == user_id && user.pw == user_pw))
    }
}
