//! Upstream response envelope and error types.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Status value used by the upstream for a successful call.
pub const STATUS_OK: u16 = 200;

/// Response envelope shared by all upstream services.
///
/// Data services fill `data`; the engine service fills `action_result`.
/// Failures carry `reason`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamEnvelope {
    #[serde(default, deserialize_with = "status_code")]
    pub status: Option<u16>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub action_result: Option<Value>,
}

impl UpstreamEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == Some(STATUS_OK)
    }
}

/// The upstream reports its status either as a number or as a numeric string.
fn status_code<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Errors from the upstream manufacturer API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    /// The request never produced a response.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("upstream rejected request: {}", describe_rejection(.status, .reason))]
    Rejected {
        status: Option<u16>,
        reason: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("invalid upstream response: {0}")]
    Decode(String),
}

fn describe_rejection(status: &Option<u16>, reason: &Option<String>) -> String {
    match (status, reason) {
        (Some(status), Some(reason)) => format!("{status} {reason}"),
        (Some(status), None) => status.to_string(),
        (None, Some(reason)) => reason.to_string(),
        (None, None) => "no status".to_string(),
    }
}

impl UpstreamError {
    /// Status code reported by the upstream, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Rejected { status, .. } => *status,
            _ => None,
        }
    }

    /// Reason reported by the upstream, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            UpstreamError::Rejected { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}
