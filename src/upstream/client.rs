//! HTTP client for the manufacturer API.
//!
//! # Responsibilities
//! - Resolve service endpoints from configuration
//! - Issue one POST per call with the upstream's request body
//! - Decode the response envelope and surface upstream failures
//!
//! No retries. Failures are returned to the caller immediately.

use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::envelope::{UpstreamEnvelope, UpstreamError};

/// Upstream services the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    VehicleInfo,
    SecurityStatus,
    Energy,
    EngineAction,
}

impl Service {
    pub fn label(self) -> &'static str {
        match self {
            Service::VehicleInfo => "vehicle_info",
            Service::SecurityStatus => "security_status",
            Service::Energy => "energy",
            Service::EngineAction => "engine_action",
        }
    }
}

/// Resolved service URLs.
#[derive(Debug, Clone)]
pub struct UpstreamEndpoints {
    vehicle_info: Url,
    security_status: Url,
    energy: Url,
    engine_action: Url,
}

impl UpstreamEndpoints {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        let base = config.base_url.trim_end_matches('/');
        let resolve = |path: &str| Url::parse(&format!("{base}{path}"));
        Ok(Self {
            vehicle_info: resolve(&config.vehicle_info_path)?,
            security_status: resolve(&config.security_status_path)?,
            energy: resolve(&config.energy_path)?,
            engine_action: resolve(&config.engine_action_path)?,
        })
    }

    pub fn url(&self, service: Service) -> &Url {
        match service {
            Service::VehicleInfo => &self.vehicle_info,
            Service::SecurityStatus => &self.security_status,
            Service::Energy => &self.energy,
            Service::EngineAction => &self.engine_action,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamRequest<'a> {
    id: &'a str,
    response_type: &'static str,
    command: &'a str,
}

/// Client for the manufacturer API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoints: Arc<UpstreamEndpoints>,
}

impl UpstreamClient {
    pub fn new(endpoints: UpstreamEndpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints: Arc::new(endpoints),
        }
    }

    /// Call one of the configured services.
    pub async fn call(
        &self,
        service: Service,
        id: &str,
        command: Option<&str>,
    ) -> Result<UpstreamEnvelope, UpstreamError> {
        let result = self.fetch(id, self.endpoints.url(service), command).await;
        metrics::record_upstream_call(service.label(), result.is_ok());
        if let Err(e) = &result {
            tracing::warn!(
                vehicle_id = %id,
                service = service.label(),
                error = %e,
                "Upstream call failed"
            );
        }
        result
    }

    /// POST `{id, responseType: "JSON", command}` to `uri` and decode the envelope.
    pub async fn fetch(
        &self,
        id: &str,
        uri: &Url,
        command: Option<&str>,
    ) -> Result<UpstreamEnvelope, UpstreamError> {
        tracing::debug!(vehicle_id = %id, uri = %uri, "Requesting upstream");

        let body = UpstreamRequest {
            id,
            response_type: "JSON",
            command: command.unwrap_or(""),
        };
        let response = self.http.post(uri.clone()).json(&body).send().await?;
        let http_status = response.status();
        let bytes = response.bytes().await?;
        let decoded = serde_json::from_slice::<UpstreamEnvelope>(&bytes);

        if !http_status.is_success() {
            let (status, reason) = match decoded {
                Ok(envelope) => (envelope.status.or(Some(http_status.as_u16())), envelope.reason),
                Err(_) => {
                    let text = String::from_utf8_lossy(&bytes).trim().to_string();
                    (Some(http_status.as_u16()), (!text.is_empty()).then_some(text))
                }
            };
            return Err(UpstreamError::Rejected { status, reason });
        }

        let envelope = decoded.map_err(|e| UpstreamError::Decode(e.to_string()))?;
        if !envelope.is_success() {
            return Err(UpstreamError::Rejected {
                status: envelope.status,
                reason: envelope.reason,
            });
        }
        Ok(envelope)
    }
}
