//! Integrity checks on normalized data.
//!
//! A failed check never blocks a response. It is logged so that upstream
//! schema drift shows up in the logs, and it suppresses persistence of vehicle
//! info.

use crate::vehicles::model::{DoorStatus, EnergyLevel, VehicleInfo};

/// Exposes an object's own fields for inspection.
pub trait Inspect {
    /// Field names in declaration order, each paired with whether it holds a known value.
    fn fields(&self) -> Vec<(&'static str, bool)>;
}

impl Inspect for VehicleInfo {
    fn fields(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("id", !self.id.is_empty()),
            ("vin", self.vin.is_known()),
            ("color", self.color.is_known()),
            ("doorCount", self.door_count.is_known()),
            ("driveTrain", self.drive_train.is_known()),
        ]
    }
}

impl Inspect for DoorStatus {
    fn fields(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("location", self.location.is_known()),
            ("locked", self.locked.is_known()),
        ]
    }
}

impl Inspect for EnergyLevel {
    fn fields(&self) -> Vec<(&'static str, bool)> {
        vec![("percent", self.percent.is_known())]
    }
}

/// Name of the first field without a known value, in declaration order.
pub fn first_missing<T: Inspect + ?Sized>(obj: &T) -> Option<&'static str> {
    obj.fields()
        .into_iter()
        .find(|(_, known)| !known)
        .map(|(name, _)| name)
}

/// Returns true if every field is known. Logs one warning for the first missing field.
pub fn verify<T: Inspect + ?Sized>(obj: &T) -> bool {
    match first_missing(obj) {
        Some(field) => {
            tracing::warn!(
                field,
                "Detected missing data! Verify if there have been changes in the integrated API."
            );
            false
        }
        None => true,
    }
}

/// [`verify`] over a list, stopping at the first element that fails.
pub fn verify_each<T: Inspect>(items: &[T]) -> bool {
    items.iter().enumerate().all(|(index, item)| match first_missing(item) {
        Some(field) => {
            tracing::warn!(
                index,
                field,
                "Detected missing data! Verify if there have been changes in the integrated API."
            );
            false
        }
        None => true,
    })
}
