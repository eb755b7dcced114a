//! `fleet-core`: foundational types for the fleet delivery planner.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `StationId`, `EdgeId`, `PackageId`, `VehicleId`       |
//! | [`cost`]     | `Cost`: finite-or-infinite path cost                 |
//! | [`time`]     | `Tick`: elapsed itinerary time                       |
//! | [`config`]   | `PlannerConfig`                                       |
//! | [`error`]    | `FleetError`, `FleetResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod cost;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlannerConfig;
pub use cost::Cost;
pub use error::{FleetError, FleetResult};
pub use ids::{EdgeId, PackageId, StationId, VehicleId};
pub use time::Tick;
