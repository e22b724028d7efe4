//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener and API surface settings.
    pub server: ServerConfig,

    /// Manufacturer API endpoints.
    pub upstream: UpstreamConfig,

    /// Vehicle record persistence.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.bind_host, self.server.port)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Listening port.
    pub port: u16,

    /// Version segment of every API route (`/api/v{api_version}`).
    pub api_version: String,

    /// Service name reported by the entry endpoint.
    pub name: String,

    /// Redirect requests that did not arrive over HTTPS.
    pub require_https: bool,

    /// Development mode disables the HTTPS redirect.
    pub development: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            api_version: "1.0".to_string(),
            name: "smartcar-api".to_string(),
            require_https: false,
            development: false,
        }
    }
}

/// Manufacturer API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the manufacturer API.
    pub base_url: String,

    /// Path of the vehicle info service.
    pub vehicle_info_path: String,

    /// Path of the security (door lock) status service.
    pub security_status_path: String,

    /// Path of the energy (fuel/battery) service.
    pub energy_path: String,

    /// Path of the engine start/stop service.
    pub engine_action_path: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://gmapi.azurewebsites.net".to_string(),
            vehicle_info_path: "/getVehicleInfoService".to_string(),
            security_status_path: "/getSecurityStatusService".to_string(),
            energy_path: "/getEnergyService".to_string(),
            engine_action_path: "/actionEngineService".to_string(),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding cached vehicle records. `None` keeps records in memory only.
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from("db.json")),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
