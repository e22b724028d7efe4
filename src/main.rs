//! Vehicle telemetry gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ http::handlers ──┬─▶ vehicles::cache ──▶ vehicles::store
//!                                                │         │
//!                                                │         ▼
//!                                                └─▶ upstream::client ──▶ Manufacturer API
//!                                                          │
//!                                                          ▼
//!                                    vehicles::normalize ──▶ vehicles::integrity
//! ```

use clap::Parser;
use std::path::PathBuf;

use vehicle_gateway::config::loader::{apply_env_overrides, read_config, ConfigError};
use vehicle_gateway::config::validation::validate_config;
use vehicle_gateway::lifecycle::{signals, startup};
use vehicle_gateway::observability::logging;
use vehicle_gateway::{GatewayConfig, Shutdown};

#[derive(Parser)]
#[command(name = "vehicle-gateway")]
#[command(about = "Uniform vehicle telemetry API over a manufacturer backend", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides config and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

fn load(args: &Args) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load(&args)?;

    logging::init(&config.observability);
    tracing::info!("vehicle-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.bind_address(),
        api_version = %config.server.api_version,
        upstream = %config.upstream.base_url,
        require_https = config.server.require_https,
        development = config.server.development,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
