//! Upstream payload normalization.
//!
//! The upstream wraps every scalar in a `{"type": "...", "value": "..."}` object
//! and sends booleans and numbers as strings. These functions map one payload
//! shape each onto the canonical model. Missing leaves become
//! [`Reading::Unknown`]; a missing or malformed enclosing object is a
//! [`NormalizeError::Structure`].

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::vehicles::model::{
    ActionStatus, DoorStatus, EnergyLevel, EnergySource, EngineActionResult, Reading, VehicleInfo,
};

/// Upstream action status that counts as success.
const EXECUTED: &str = "EXECUTED";

/// Payload did not have the documented shape.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    #[error("unexpected upstream payload: {0}")]
    Structure(String),

    #[error("upstream payload is missing `{0}`")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self {
        NormalizeError::Structure(err.to_string())
    }
}

/// A `{"type", "value"}` leaf.
#[derive(Debug, Deserialize)]
struct Leaf {
    #[serde(default)]
    value: Value,
}

impl Leaf {
    /// Leaf value as text, unmodified. Null, blank and the literal `"null"` count as absent.
    fn text(&self) -> Option<String> {
        let text = match &self.value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            None
        } else {
            Some(text)
        }
    }

    fn is_true(&self) -> bool {
        self.text().is_some_and(|t| t.trim().eq_ignore_ascii_case("true"))
    }

    fn flag(&self) -> Reading<bool> {
        match self.text().as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("true") => Reading::Known(true),
            Some(t) if t.eq_ignore_ascii_case("false") => Reading::Known(false),
            _ => Reading::Unknown,
        }
    }

    fn number(&self) -> Reading<f64> {
        self.text()
            .and_then(|t| t.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VehiclePayload {
    vin: Leaf,
    color: Leaf,
    two_door_coupe: Option<Leaf>,
    four_door_sedan: Option<Leaf>,
    drive_train: Leaf,
}

#[derive(Debug, Deserialize)]
struct SecurityPayload {
    doors: DoorList,
}

#[derive(Debug, Deserialize)]
struct DoorList {
    values: Vec<DoorPayload>,
}

#[derive(Debug, Deserialize)]
struct DoorPayload {
    location: Leaf,
    locked: Leaf,
}

#[derive(Debug, Deserialize)]
struct ActionPayload {
    #[serde(default)]
    status: Option<String>,
}

/// Map a vehicle info payload onto [`VehicleInfo`].
pub fn vehicle_info(id: &str, data: &Value) -> Result<VehicleInfo, NormalizeError> {
    let payload = VehiclePayload::deserialize(data)?;

    let two_door = payload
        .two_door_coupe
        .as_ref()
        .ok_or(NormalizeError::MissingField("twoDoorCoupe"))?;
    let door_count = if two_door.is_true() {
        Reading::Known(2)
    } else {
        let four_door = payload
            .four_door_sedan
            .as_ref()
            .ok_or(NormalizeError::MissingField("fourDoorSedan"))?;
        if four_door.is_true() {
            Reading::Known(4)
        } else {
            Reading::Unknown
        }
    };

    Ok(VehicleInfo {
        id: id.to_string(),
        vin: payload.vin.text().into(),
        color: payload.color.text().into(),
        door_count,
        drive_train: payload.drive_train.text().into(),
    })
}

/// Map a security status payload onto an ordered door list.
pub fn door_statuses(data: &Value) -> Result<Vec<DoorStatus>, NormalizeError> {
    let payload = SecurityPayload::deserialize(data)?;
    Ok(payload
        .doors
        .values
        .into_iter()
        .map(|door| DoorStatus {
            location: door.location.text().into(),
            locked: door.locked.flag(),
        })
        .collect())
}

/// Read the fuel or battery percentage from an energy payload.
///
/// A reading of `0` is a valid (empty) level and stays known.
pub fn energy_level(data: &Value, source: EnergySource) -> Result<EnergyLevel, NormalizeError> {
    let field = source.upstream_field();
    let leaf = data
        .get(field)
        .ok_or(NormalizeError::MissingField(field))?;
    let leaf = Leaf::deserialize(leaf)?;
    Ok(EnergyLevel { percent: leaf.number() })
}

/// Map an engine `actionResult` object onto [`EngineActionResult`].
pub fn engine_action(action_result: &Value) -> Result<EngineActionResult, NormalizeError> {
    let payload = ActionPayload::deserialize(action_result)?;
    let status = match payload.status.as_deref() {
        Some(EXECUTED) => ActionStatus::Success,
        _ => ActionStatus::Error,
    };
    Ok(EngineActionResult { status })
}
