//! Manufacturer API integration.
//!
//! # Data Flow
//! ```text
//! handler / vehicle cache
//!     → client.rs (POST {id, responseType, command})
//!     → envelope.rs (decode {status, reason, data | actionResult})
//!     → UpstreamEnvelope or UpstreamError
//! ```

pub mod client;
pub mod envelope;

pub use client::{Service, UpstreamClient, UpstreamEndpoints};
pub use envelope::{UpstreamEnvelope, UpstreamError};
