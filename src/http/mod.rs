//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → middleware/ (HTTPS redirect, request metrics)
//!     → handlers.rs (vehicle cache / upstream client / normalizer)
//!     → response.rs (map failures to status codes)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::GatewayError;
pub use routes::ApiPaths;
pub use server::{AppState, HttpServer};
