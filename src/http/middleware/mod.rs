//! HTTP middleware.

pub mod https;
pub mod metrics;

pub use https::redirect_to_https;
pub use metrics::track_requests;
