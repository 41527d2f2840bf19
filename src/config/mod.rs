use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_NOTION_BASE: &str = "https://api.notion.com/v1";
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub notion: NotionConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Upstream credentials and collection ids. Every collection id is optional at
/// startup; the routes that need one fail with a 500 when it is unset.
#[derive(Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub version: String,
    pub users_db: Option<String>,
    pub notification_db: Option<String>,
    pub anon_db: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub static_dir: String,
}

impl Environment {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(self) -> &'static str {
        match self {
            Environment::Development => "debug,hyper=info,tower_http=debug",
            Environment::Staging => "info,tower_http=info",
            Environment::Production => "info,tower_http=warn",
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::defaults(environment).with_env_overrides()
    }

    fn defaults(environment: Environment) -> Self {
        Self {
            environment,
            notion: NotionConfig::default(),
            server: ServerConfig {
                static_dir: "static".to_string(),
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Notion credentials and collections
        self.notion.api_key = non_empty_var("NOTION_API_KEY");
        self.notion.users_db = non_empty_var("NOTION_DB_ID");
        self.notion.notification_db = non_empty_var("NOTION_NOTIFICATION_DB");
        self.notion.anon_db = non_empty_var("NOTION_ANON_DB");
        if let Some(v) = non_empty_var("NOTION_BASE_URL") {
            self.notion.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = non_empty_var("NOTION_VERSION") {
            self.notion.version = v;
        }

        // Server overrides
        if let Some(v) = non_empty_var("STATIC_DIR") {
            self.server.static_dir = v;
        }

        self
    }

    /// Configuration pointed at an arbitrary upstream, used by tests and local
    /// mocks.
    pub fn for_upstream(base_url: impl Into<String>) -> Self {
        let mut config = Self::defaults(Environment::Development);
        config.notion.base_url = base_url.into().trim_end_matches('/').to_string();
        config
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NOTION_BASE.to_string(),
            version: DEFAULT_NOTION_VERSION.to_string(),
            users_db: None,
            notification_db: None,
            anon_db: None,
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("users_db", &self.users_db)
            .field("notification_db", &self.notification_db)
            .field("anon_db", &self.anon_db)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
