//! VidHub Server: video sharing backend
//!
//! Main entry point that wires all crates together and starts the server.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use vidhub_core::config::AppConfig;
use vidhub_database::DatabasePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("VIDHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("Failed to load configuration")?;

    init_logging(&config);
    tracing::info!(env = %env, "Starting VidHub v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        return Err(e);
    }
    Ok(())
}

/// Initialize tracing/logging. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate, and serve.
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database)
        .await
        .context("Database connection failed")?;

    vidhub_database::migration::run_migrations(db.pool())
        .await
        .context("Migration failed")?;

    tracing::info!(
        root = %config.storage.root_path,
        public_base_url = %config.storage.public_base_url,
        "Media storage configured"
    );

    vidhub_api::run_server(config, db).await?;
    Ok(())
}
