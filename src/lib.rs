//! Vehicle telemetry gateway library.
//!
//! Exposes a uniform REST API over a single manufacturer API, normalizing its
//! payloads and caching static vehicle metadata.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;
pub mod vehicles;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
