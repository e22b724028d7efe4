//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the vehicle record store
//! - Install the metrics exporter when enabled
//! - Build the HTTP server and bind its listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::vehicles::VehicleStore;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open vehicle store: {0}")]
    Store(std::io::Error),

    #[error("invalid upstream URL: {0}")]
    Upstream(#[from] url::ParseError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Open the configured store, in memory when no path is set.
pub fn open_store(config: &GatewayConfig) -> Result<VehicleStore, StartupError> {
    match &config.storage.path {
        Some(path) => VehicleStore::open(path).map_err(StartupError::Store),
        None => Ok(VehicleStore::new(None)),
    }
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(config: GatewayConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let store = Arc::new(open_store(&config)?);
    tracing::info!(records = store.len(), "Vehicle store ready");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.bind_address();
    let server = HttpServer::new(config, store)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address: address.clone(), source })?;

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
