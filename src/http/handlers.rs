//! Route handlers.
//!
//! Each handler extracts the vehicle id, calls the upstream or the vehicle
//! cache, normalizes the payload and maps failures through [`GatewayError`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::response::GatewayError;
use crate::http::server::AppState;
use crate::upstream::{Service, UpstreamEnvelope};
use crate::vehicles::integrity;
use crate::vehicles::normalize::{self, NormalizeError};
use crate::vehicles::{
    DoorStatus, EnergyLevel, EnergySource, EngineAction, EngineActionResult, VehicleInfo,
    VehicleView,
};

#[derive(Debug, Serialize)]
pub struct ApiLinks {
    pub vehicles: String,
}

/// Body of the API entry endpoints.
#[derive(Debug, Serialize)]
pub struct ApiRoot {
    pub name: String,
    pub version: String,
    pub links: ApiLinks,
}

#[derive(Debug, Deserialize)]
pub struct EngineRequest {
    #[serde(default)]
    pub action: Option<String>,
}

fn data(envelope: &UpstreamEnvelope) -> Result<&Value, NormalizeError> {
    envelope.data.as_ref().ok_or(NormalizeError::MissingField("data"))
}

pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        state.config.server.api_version.clone(),
    )
}

pub async fn api_root(State(state): State<AppState>) -> Json<ApiRoot> {
    Json(ApiRoot {
        name: state.config.server.name.clone(),
        version: state.config.server.api_version.clone(),
        links: ApiLinks {
            vehicles: state.paths.vehicles.clone(),
        },
    })
}

/// Cached vehicles only. Never calls the upstream.
pub async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<VehicleView>> {
    let views = state
        .cache
        .cached()
        .into_iter()
        .map(|record| VehicleView::new(VehicleInfo::from(record), &state.paths.vehicles))
        .collect();
    Json(views)
}

pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleView>, GatewayError> {
    let info = state.cache.get_vehicle(&id).await?;
    Ok(Json(VehicleView::new(info, &state.paths.vehicles)))
}

pub async fn get_doors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DoorStatus>>, GatewayError> {
    let envelope = state.upstream.call(Service::SecurityStatus, &id, None).await?;
    let doors = normalize::door_statuses(data(&envelope)?)?;
    integrity::verify_each(&doors);
    Ok(Json(doors))
}

pub async fn get_fuel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnergyLevel>, GatewayError> {
    energy(&state, &id, EnergySource::Fuel).await.map(Json)
}

pub async fn get_battery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EnergyLevel>, GatewayError> {
    energy(&state, &id, EnergySource::Battery).await.map(Json)
}

async fn energy(
    state: &AppState,
    id: &str,
    source: EnergySource,
) -> Result<EnergyLevel, GatewayError> {
    let envelope = state.upstream.call(Service::Energy, id, None).await?;
    let level = normalize::energy_level(data(&envelope)?, source)?;
    integrity::verify(&level);
    Ok(level)
}

/// Start or stop the engine. Anything other than `START`/`STOP` is rejected
/// before the upstream is contacted.
pub async fn engine_action(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<EngineRequest>, JsonRejection>,
) -> Result<Json<EngineActionResult>, GatewayError> {
    let action = body
        .ok()
        .and_then(|Json(request)| request.action)
        .as_deref()
        .and_then(EngineAction::parse)
        .ok_or(GatewayError::InvalidAction)?;
    tracing::info!(vehicle_id = %id, action = ?action, "Engine action requested");

    let envelope = state
        .upstream
        .call(Service::EngineAction, &id, Some(action.upstream_command()))
        .await?;
    let action_result = envelope
        .action_result
        .as_ref()
        .ok_or(NormalizeError::MissingField("actionResult"))?;
    Ok(Json(normalize::engine_action(action_result)?))
}
