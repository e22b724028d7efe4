//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, HTTPS redirect, metrics)
//! - Bind server to listener
//! - Stop gracefully on the shutdown signal

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::middleware::{redirect_to_https, track_requests};
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::http::routes::ApiPaths;
use crate::upstream::{UpstreamClient, UpstreamEndpoints};
use crate::vehicles::{VehicleCache, VehicleStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub paths: Arc<ApiPaths>,
    pub upstream: UpstreamClient,
    pub cache: VehicleCache,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: GatewayConfig, store: Arc<VehicleStore>) -> Result<Self, url::ParseError> {
        let endpoints = UpstreamEndpoints::from_config(&config.upstream)?;
        let upstream = UpstreamClient::new(endpoints);
        let cache = VehicleCache::new(store, upstream.clone());
        let config = Arc::new(config);

        let state = AppState {
            paths: Arc::new(ApiPaths::new(&config.server.api_version)),
            config: config.clone(),
            upstream,
            cache,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let paths = state.paths.clone();
        let router = Router::new()
            .route("/version", get(handlers::version))
            .route("/", get(handlers::api_root))
            .route("/api", get(handlers::api_root))
            .route(&paths.base, get(handlers::api_root))
            .route(&paths.vehicles, get(handlers::list_vehicles))
            .route(&paths.vehicle(), get(handlers::get_vehicle))
            .route(&paths.doors(), get(handlers::get_doors))
            .route(&paths.fuel(), get(handlers::get_fuel))
            .route(&paths.battery(), get(handlers::get_battery))
            .route(&paths.engine(), post(handlers::engine_action))
            .with_state(state)
            .layer(middleware::from_fn(track_requests));

        let router = if config.server.require_https && !config.server.development {
            tracing::info!("HTTPS redirect enabled");
            router.layer(middleware::from_fn(redirect_to_https))
        } else {
            router
        };

        router
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(set_request_id_layer())
    }

    /// Run the server until a shutdown signal is received.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            api_version = %self.config.server.api_version,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
