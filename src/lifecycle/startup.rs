//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Open the record store and seed it
//! - Start the metrics exporter
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, RainConfig};
use crate::http::HttpServer;
use crate::lifecycle::seed::seed_if_empty;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::store::{open_store, RecordStore, StoreError};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load configuration from `path`, or use defaults when none is given.
pub fn resolve_config(path: Option<&Path>) -> Result<RainConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(RainConfig::default()),
    }
}

/// Open the configured store and apply seed data.
pub fn prepare_store(config: &RainConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    let store = open_store(&config.storage)?;
    if config.seed.enabled {
        seed_if_empty(store.as_ref())?;
    }
    Ok(store)
}

/// Bring the service up and block until it shuts down.
pub async fn run(config: RainConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage = ?config.storage.backend,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = prepare_store(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
