//! TrakShip server binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Open the SQLite database and run migrations
//! 3. Seed the FAQ catalog when empty
//! 4. Start the axum HTTP server

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use trakship_api::{routes, AppState};
use trakship_chat::default_faqs;
use trakship_core::config::TrakshipConfig;
use trakship_storage::{Database, FaqRepository};

use cli::CliArgs;

/// Expand a leading `~/` to the user's home directory.
fn resolve_data_dir(configured: &str) -> PathBuf {
    if configured.starts_with("~/") || configured.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&configured[2..])
    } else {
        PathBuf::from(configured)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = TrakshipConfig::load_or_default(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }
    config.general.port = args.resolve_port(config.general.port);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.general.log_level.clone())
            }),
        )
        .init();

    tracing::info!("Starting TrakShip v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(path = %data_dir.display(), error = %e, "Failed to create data directory");
        return Err(e.into());
    }

    let db_path = data_dir.join("trakship.db");
    let database = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    // FAQ catalog.
    let faqs = FaqRepository::new(Arc::clone(&database));
    let seeded = faqs.seed_if_empty(&default_faqs())?;
    if seeded > 0 {
        tracing::info!(count = seeded, "Default FAQs initialized");
    }

    // HTTP server.
    let state = AppState::new(config, database);
    routes::start_server(state).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_expands_home() {
        let dir = resolve_data_dir("~/somewhere/data");
        assert!(!dir.to_string_lossy().starts_with('~'));
        assert!(dir.to_string_lossy().ends_with("somewhere/data"));
    }

    #[test]
    fn test_resolve_data_dir_absolute_passthrough() {
        let dir = resolve_data_dir("/var/lib/trakship");
        assert_eq!(dir, PathBuf::from("/var/lib/trakship"));
    }
}
