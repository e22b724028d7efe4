//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the upstream URL and service paths
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.api_version must be non-empty and must not contain '/' (got {0:?})")]
    ApiVersion(String),

    #[error("upstream.base_url is not a valid http(s) URL: {0}")]
    UpstreamUrl(String),

    #[error("upstream.{field} must start with '/' (got {value:?})")]
    ServicePath { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.metrics_address is not a socket address: {0}")]
    MetricsAddress(String),
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let version = &config.server.api_version;
    if version.trim().is_empty() || version.contains('/') {
        errors.push(ValidationError::ApiVersion(version.clone()));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::UpstreamUrl(config.upstream.base_url.clone())),
    }

    let upstream = &config.upstream;
    for (field, value) in [
        ("vehicle_info_path", &upstream.vehicle_info_path),
        ("security_status_path", &upstream.security_status_path),
        ("energy_path", &upstream.energy_path),
        ("engine_action_path", &upstream.engine_action_path),
    ] {
        if !value.starts_with('/') {
            errors.push(ValidationError::ServicePath { field, value: value.clone() });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let metrics_address = &config.observability.metrics_address;
    if config.observability.metrics_enabled && metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
