//! Client-facing vehicle representation with discovery links.

use serde::Serialize;

use crate::vehicles::model::VehicleInfo;

/// URL of a resource under `endpoint` identified by `id`.
pub fn discovery_url(endpoint: &str, id: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleLinks {
    pub url: String,
    pub security: String,
    pub fuel: String,
    pub battery: String,
    pub engine: String,
}

impl VehicleLinks {
    fn for_url(url: String) -> Self {
        Self {
            security: format!("{url}/doors"),
            fuel: format!("{url}/fuel"),
            battery: format!("{url}/battery"),
            engine: format!("{url}/engine"),
            url,
        }
    }
}

/// A [`VehicleInfo`] plus links to itself and its telemetry resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleView {
    #[serde(flatten)]
    pub info: VehicleInfo,
    pub links: VehicleLinks,
}

impl VehicleView {
    pub fn new(info: VehicleInfo, vehicles_endpoint: &str) -> Self {
        let links = VehicleLinks::for_url(discovery_url(vehicles_endpoint, &info.id));
        Self { info, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicles::model::Reading;
    use serde_json::json;

    #[test]
    fn test_view_links() {
        let info = VehicleInfo {
            id: "1234".into(),
            vin: Reading::Known("123123412412".into()),
            color: Reading::Unknown,
            door_count: Reading::Known(4),
            drive_train: Reading::Known("v8".into()),
        };
        let view = VehicleView::new(info, "/api/v1.0/vehicles");
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({
                "id": "1234",
                "vin": "123123412412",
                "color": "unknown",
                "doorCount": 4,
                "driveTrain": "v8",
                "links": {
                    "url": "/api/v1.0/vehicles/1234",
                    "security": "/api/v1.0/vehicles/1234/doors",
                    "fuel": "/api/v1.0/vehicles/1234/fuel",
                    "battery": "/api/v1.0/vehicles/1234/battery",
                    "engine": "/api/v1.0/vehicles/1234/engine"
                }
            })
        );
    }

    #[test]
    fn test_discovery_url_trims_slash() {
        assert_eq!(discovery_url("/api/v1.0/vehicles/", "42"), "/api/v1.0/vehicles/42");
    }
}
