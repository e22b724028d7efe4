//! Route paths derived from the configured API version.

/// Paths of the versioned API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    /// `/api/v{version}`
    pub base: String,
    /// `/api/v{version}/vehicles`
    pub vehicles: String,
}

impl ApiPaths {
    pub fn new(api_version: &str) -> Self {
        let base = format!("/api/v{api_version}");
        let vehicles = format!("{base}/vehicles");
        Self { base, vehicles }
    }

    /// Router pattern for a single vehicle.
    pub fn vehicle(&self) -> String {
        format!("{}/{{id}}", self.vehicles)
    }

    pub fn doors(&self) -> String {
        format!("{}/doors", self.vehicle())
    }

    pub fn fuel(&self) -> String {
        format!("{}/fuel", self.vehicle())
    }

    pub fn battery(&self) -> String {
        format!("{}/battery", self.vehicle())
    }

    pub fn engine(&self) -> String {
        format!("{}/engine", self.vehicle())
    }
}
