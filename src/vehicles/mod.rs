//! Vehicle data subsystem.
//!
//! # Data Flow
//! ```text
//! upstream envelope
//!     → normalize.rs (payload → canonical model)
//!     → integrity.rs (flag missing fields, log only)
//!     → cache.rs (vehicle info: persist complete records)
//!     → store.rs (durable keyed records)
//!     → view.rs (add discovery links for clients)
//! ```
//!
//! Live telemetry (doors, fuel, battery, engine) skips the cache and store.

pub mod cache;
pub mod integrity;
pub mod model;
pub mod normalize;
pub mod store;
pub mod view;

pub use cache::{LookupError, VehicleCache};
pub use model::{
    ActionStatus, DoorStatus, EnergyLevel, EnergySource, EngineAction, EngineActionResult,
    Reading, VehicleInfo, VehicleRecord,
};
pub use store::VehicleStore;
pub use view::{discovery_url, VehicleView};
