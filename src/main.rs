use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use notion_board::config::AppConfig;
use notion_board::services::BoardKind;
use notion_board::{app, AppState};

#[derive(Parser)]
#[command(name = "notion-board")]
#[command(about = "Notice board backend on top of the Notion API")]
#[command(version)]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0", help = "Interface to listen on")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 5000, help = "Port to listen on")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so NOTION_* and PORT are visible below
    let _ = dotenvy::dotenv();

    // Read once; handlers only ever see this copy
    let config = Arc::new(AppConfig::from_env());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    let args = Args::parse();

    tracing::info!(environment = ?config.environment, notion = ?config.notion, "starting notion-board");

    if config.notion.api_key.is_none() {
        tracing::warn!("NOTION_API_KEY is not set; every upstream call will fail");
    }
    if config.notion.users_db.is_none() {
        tracing::warn!("NOTION_DB_ID is not set; /login will fail");
    }
    for kind in [BoardKind::Notification, BoardKind::Anon] {
        if kind.collection_id(&config.notion).is_none() {
            tracing::warn!("{} is not set; the {} board will fail", kind.env_var(), kind.label());
        }
    }

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("notion-board listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(config)))
        .await
        .context("server")?;

    Ok(())
}
