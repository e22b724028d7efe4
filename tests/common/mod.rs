//! Shared utilities for integration tests.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use vehicle_gateway::vehicles::VehicleStore;
use vehicle_gateway::{GatewayConfig, HttpServer, Shutdown};

/// A request received by the mock upstream.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    #[serde(skip)]
    pub service: String,
    pub id: String,
    pub response_type: String,
    pub command: String,
}

type Responder = Arc<dyn Fn(&Call) -> (u16, Value) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    calls: Arc<Mutex<Vec<Call>>>,
    responder: Responder,
    delay: Duration,
}

/// A programmable stand-in for the manufacturer API.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<Call>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, service: &str) -> usize {
        self.calls().iter().filter(|c| c.service == service).count()
    }
}

async fn handle(
    State(state): State<MockState>,
    Path(service): Path<String>,
    Json(mut call): Json<Call>,
) -> (StatusCode, Json<Value>) {
    call.service = service;
    state.calls.lock().unwrap().push(call.clone());
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    let (status, body) = (state.responder)(&call);
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

/// Start a mock upstream answering with `responder`.
#[allow(dead_code)]
pub async fn start_mock_upstream<F>(responder: F) -> MockUpstream
where
    F: Fn(&Call) -> (u16, Value) + Send + Sync + 'static,
{
    start_mock_upstream_with_delay(Duration::ZERO, responder).await
}

/// Start a mock upstream that waits `delay` before answering.
#[allow(dead_code)]
pub async fn start_mock_upstream_with_delay<F>(delay: Duration, responder: F) -> MockUpstream
where
    F: Fn(&Call) -> (u16, Value) + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        calls: calls.clone(),
        responder: Arc::new(responder),
        delay,
    };
    let app = Router::new()
        .route("/{service}", post(handle))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

fn leaf(kind: &str, value: &str) -> Value {
    json!({ "type": kind, "value": value })
}

fn not_found(id: &str) -> (u16, Value) {
    (404, json!({ "status": "404", "reason": format!("Vehicle id: {id} not found.") }))
}

/// Responses modelled on the manufacturer API for a few known vehicles.
///
/// - `1234`: four-door sedan, gas
/// - `1235`: two-door coupe, electric (empty battery)
/// - `1236`: vehicle info without a color, battery at 50
pub fn gm_responder(call: &Call) -> (u16, Value) {
    match (call.service.as_str(), call.id.as_str()) {
        ("getVehicleInfoService", id @ ("1234" | "1235" | "1236")) => {
            let two_door = if id == "1235" { "True" } else { "False" };
            let color = if id == "1236" { "" } else { "Metallic Silver" };
            (200, json!({
                "service": "getVehicleInfo",
                "status": "200",
                "data": {
                    "vin": leaf("String", &format!("VIN{id}")),
                    "color": leaf("String", color),
                    "fourDoorSedan": leaf("Boolean", if id == "1235" { "False" } else { "True" }),
                    "twoDoorCoupe": leaf("Boolean", two_door),
                    "driveTrain": leaf("String", "v8")
                }
            }))
        }
        ("getSecurityStatusService", "1234" | "1235") => (200, json!({
            "service": "getSecurityStatus",
            "status": "200",
            "data": {
                "doors": {
                    "type": "Array",
                    "values": [
                        {
                            "location": leaf("String", "frontLeft"),
                            "locked": leaf("Boolean", "True")
                        },
                        {
                            "location": leaf("String", "frontRight"),
                            "locked": leaf("Boolean", "False")
                        }
                    ]
                }
            }
        })),
        ("getEnergyService", "1234") => (200, json!({
            "service": "getEnergy",
            "status": "200",
            "data": {
                "tankLevel": leaf("Number", "30.2"),
                "batteryLevel": leaf("Null", "null")
            }
        })),
        ("getEnergyService", "1235") => (200, json!({
            "service": "getEnergy",
            "status": "200",
            "data": {
                "tankLevel": leaf("Null", "null"),
                "batteryLevel": leaf("Number", "0")
            }
        })),
        ("getEnergyService", "1236") => (200, json!({
            "service": "getEnergy",
            "status": "200",
            "data": {
                "tankLevel": leaf("Null", "null"),
                "batteryLevel": leaf("Number", "50")
            }
        })),
        ("actionEngineService", "1234" | "1235") => {
            let status = if call.command == "START_VEHICLE" { "EXECUTED" } else { "FAILED" };
            (200, json!({
                "service": "actionEngine",
                "status": "200",
                "actionResult": { "status": status }
            }))
        }
        (_, id) => not_found(id),
    }
}

/// A running gateway instance.
pub struct Gateway {
    pub url: String,
    pub store: Arc<VehicleStore>,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl Gateway {
    pub fn vehicles_url(&self) -> String {
        format!("{}/api/v1.0/vehicles", self.url)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config pointing at `upstream_url` with in-memory storage.
pub fn test_config(upstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    config.storage.path = None;
    config
}

/// Boot a gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> Gateway {
    let store = Arc::new(VehicleStore::new(None));
    let server = HttpServer::new(config, store.clone()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway {
        url: format!("http://{}", addr),
        store,
        shutdown,
    }
}
