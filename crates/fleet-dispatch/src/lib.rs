//! `fleet-dispatch`: package/vehicle models and assignment strategies.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`model`]      | `Package`, `Vehicle`, `VehicleCursor`                       |
//! | [`assignment`] | `Assignment`, `AssignmentFailure`                           |
//! | [`strategy`]   | `AssignmentStrategy` trait, `DispatchContext`, `NearestVehicle` |
//! | [`error`]      | `DispatchError`, `DispatchResult<T>`                        |
//!
//! # Trip model
//!
//! A vehicle carries exactly one package per trip: it drives to the pickup,
//! loads, drives to the drop-off, unloads, and only then starts the next
//! package.  Strategies decide *which* vehicle takes each package and in what
//! order; the itinerary crate turns that into timed moves.

pub mod assignment;
pub mod error;
pub mod model;
pub mod strategy;


pub use assignment::{Assignment, AssignmentFailure};
pub use error::{DispatchError, DispatchResult};
pub use model::{Package, Vehicle, VehicleCursor};
pub use strategy::{AssignmentStrategy, DispatchContext, NearestVehicle};
