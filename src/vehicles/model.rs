//! Canonical vehicle data model.
//!
//! Upstream fields are frequently missing or carry placeholder values, so every
//! normalized field is a [`Reading`]. Only [`VehicleRecord`] (the persisted form)
//! carries plain values, and it can only be built from a fully known
//! [`VehicleInfo`].

use serde::{Deserialize, Serialize, Serializer};

/// Wire representation of [`Reading::Unknown`].
pub const UNKNOWN: &str = "unknown";

/// A value reported by the upstream, or the absence of one.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Known(T),
    Unknown,
}

impl<T> Reading<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Reading::Known(_))
    }

    pub fn known(self) -> Option<T> {
        match self {
            Reading::Known(v) => Some(v),
            Reading::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Reading::Known(v),
            None => Reading::Unknown,
        }
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Known(v) => v.serialize(serializer),
            Reading::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Static vehicle metadata as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub id: String,
    pub vin: Reading<String>,
    pub color: Reading<String>,
    pub door_count: Reading<u8>,
    pub drive_train: Reading<String>,
}

impl VehicleInfo {
    /// Convert into the persisted form. Returns `None` if any field is unknown.
    pub fn to_record(&self) -> Option<VehicleRecord> {
        if self.id.is_empty() {
            return None;
        }
        Some(VehicleRecord {
            id: self.id.clone(),
            vin: self.vin.clone().known()?,
            color: self.color.clone().known()?,
            door_count: self.door_count.clone().known()?,
            drive_train: self.drive_train.clone().known()?,
        })
    }
}

/// A fully known vehicle, as stored in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub vin: String,
    pub color: String,
    pub door_count: u8,
    pub drive_train: String,
}

impl From<VehicleRecord> for VehicleInfo {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            vin: Reading::Known(record.vin),
            color: Reading::Known(record.color),
            door_count: Reading::Known(record.door_count),
            drive_train: Reading::Known(record.drive_train),
        }
    }
}

/// Lock state of a single door.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorStatus {
    pub location: Reading<String>,
    pub locked: Reading<bool>,
}

/// Fuel tank or battery charge level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyLevel {
    #[serde(serialize_with = "serialize_percent")]
    pub percent: Reading<f64>,
}

/// Largest magnitude at which every whole `f64` is an exact integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole percentages go on the wire as integers (`50`, not `50.0`).
fn serialize_percent<S: Serializer>(
    percent: &Reading<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match percent {
        Reading::Known(v) if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_i64(*v as i64)
        }
        Reading::Known(v) => serializer.serialize_f64(*v),
        Reading::Unknown => serializer.serialize_str(UNKNOWN),
    }
}

/// Which upstream energy field a level is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergySource {
    Fuel,
    Battery,
}

impl EnergySource {
    /// Field name in the upstream energy payload.
    pub fn upstream_field(self) -> &'static str {
        match self {
            EnergySource::Fuel => "tankLevel",
            EnergySource::Battery => "batteryLevel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

/// Outcome of an engine start/stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineActionResult {
    pub status: ActionStatus,
}

/// Engine actions accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    Start,
    Stop,
}

impl EngineAction {
    /// Parse a client-supplied action. Only the exact literals `START` and `STOP` are accepted.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "START" => Some(EngineAction::Start),
            "STOP" => Some(EngineAction::Stop),
            _ => None,
        }
    }

    /// Command string understood by the upstream engine service.
    pub fn upstream_command(self) -> &'static str {
        match self {
            EngineAction::Start => "START_VEHICLE",
            EngineAction::Stop => "STOP_VEHICLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VehicleInfo {
        VehicleInfo {
            id: "1234".into(),
            vin: Reading::Known("123123412412".into()),
            color: Reading::Known("Metallic Silver".into()),
            door_count: Reading::Known(4),
            drive_train: Reading::Known("v8".into()),
        }
    }

    #[test]
    fn test_unknown_serializes_as_sentinel() {
        let level = EnergyLevel { percent: Reading::Unknown };
        assert_eq!(serde_json::to_value(&level).unwrap(), json!({ "percent": "unknown" }));
    }

    #[test]
    fn test_whole_percent_serializes_as_integer() {
        let cases = [(0.0, json!(0)), (50.0, json!(50)), (100.0, json!(100)), (30.2, json!(30.2))];
        for (percent, expected) in cases {
            let level = EnergyLevel { percent: Reading::Known(percent) };
            assert_eq!(
                serde_json::to_string(&level).unwrap(),
                serde_json::to_string(&json!({ "percent": expected })).unwrap(),
                "percent {percent}"
            );
        }
    }

    #[test]
    fn test_vehicle_info_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1234",
                "vin": "123123412412",
                "color": "Metallic Silver",
                "doorCount": 4,
                "driveTrain": "v8"
            })
        );
    }

    #[test]
    fn test_record_requires_every_field() {
        let record = sample().to_record().unwrap();
        assert_eq!(VehicleInfo::from(record), sample());

        let mut partial = sample();
        partial.color = Reading::Unknown;
        assert!(partial.to_record().is_none());
    }

    #[test]
    fn test_literal_unknown_is_still_known() {
        let mut info = sample();
        info.color = Reading::Known(UNKNOWN.into());
        assert!(info.to_record().is_some());
    }

    #[test]
    fn test_engine_action_parse() {
        assert_eq!(EngineAction::parse("START"), Some(EngineAction::Start));
        assert_eq!(EngineAction::parse("STOP"), Some(EngineAction::Stop));
        assert_eq!(EngineAction::parse("start"), None);
        assert_eq!(EngineAction::parse("JUMP"), None);
        assert_eq!(EngineAction::Stop.upstream_command(), "STOP_VEHICLE");
    }

    #[test]
    fn test_action_status_lowercase() {
        let result = EngineActionResult { status: ActionStatus::Success };
        assert_eq!(serde_json::to_value(result).unwrap(), json!({ "status": "success" }));
    }
}
