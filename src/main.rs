//! sqlitetree-server - nested-set tree service over SQLite

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sqlitetree_server::api::{create_router, AppState};
use sqlitetree_server::config::{Config, EngineConfig};
use sqlitetree_server::storage::{SqliteConfig, SqliteStore};
use sqlitetree_server::{ServerError, ServerResult};

#[derive(Parser, Debug)]
#[command(name = "sqlitetree-server")]
#[command(about = "Nested-set tree service: atomic insert, move and delete over SQLite")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "SQLITETREE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "SQLITETREE_PORT", default_value = "5000")]
    port: u16,

    /// Path to SQLite database
    #[arg(long, env = "SQLITETREE_DATABASE_PATH", default_value = "./tree.db")]
    database: String,

    /// How long a writer waits for another connection's lock
    #[arg(long, env = "SQLITETREE_BUSY_TIMEOUT_MS", default_value = "5000")]
    busy_timeout_ms: u32,

    /// Retries after a lock conflict before the request fails
    #[arg(long, env = "SQLITETREE_MAX_RETRIES")]
    max_retries: Option<u32>,

    /// Log level
    #[arg(long, env = "SQLITETREE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ServerResult<(Config, SqliteConfig)> {
        if self.database.trim().is_empty() {
            return Err(ServerError::Config("database path must not be empty".into()));
        }

        let mut engine = EngineConfig::from_env();
        if let Some(max_retries) = self.max_retries {
            engine.max_retries = max_retries;
        }

        let sqlite = SqliteConfig {
            path: self.database.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            ..Default::default()
        };

        let config = Config {
            host: self.host,
            port: self.port,
            database_path: self.database,
            log_level: self.log_level,
            engine,
        };
        Ok((config, sqlite))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, sqlite) = Args::parse().into_config()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting sqlitetree-server v{}", env!("CARGO_PKG_VERSION"));

    // Schema is created once, before anything can reach the store
    let store = SqliteStore::with_config(sqlite).context("failed to open database")?;
    store.initialize().context("failed to initialize schema")?;
    let stats = store.stats()?;
    tracing::info!(
        database = %store.path(),
        trees = stats.tree_count,
        nodes = stats.node_count,
        "Database ready"
    );

    let state = AppState::new(Arc::new(store), config.engine.clone());
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!(addr = %config.bind_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
