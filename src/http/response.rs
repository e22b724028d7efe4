//! Error to HTTP response mapping.
//!
//! # Responsibilities
//! - Map upstream, normalization and client input failures to status codes
//! - Pass the upstream status and reason through when the upstream gave them
//!
//! # Design Decisions
//! - Upstream failures without a usable status become 500
//! - Structural payload errors become 500 with the error text as body
//! - Invalid engine actions become 400 before any upstream call

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::upstream::UpstreamError;
use crate::vehicles::normalize::NormalizeError;
use crate::vehicles::LookupError;

/// Failure of a single gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("invalid action")]
    InvalidAction,
}

impl From<LookupError> for GatewayError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Upstream(e) => GatewayError::Upstream(e),
            LookupError::Normalize(e) => GatewayError::Normalize(e),
        }
    }
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Upstream(e) => e
                .status()
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            GatewayError::Normalize(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::InvalidAction => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> String {
        match self {
            GatewayError::Upstream(e) => e
                .reason()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, self.body()).into_response()
    }
}
