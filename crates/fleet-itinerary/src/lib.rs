//! `fleet-itinerary`: timed move schedules per vehicle.
//!
//! # Replay model
//!
//! ```text
//! for each vehicle (independently, clock = 0, location = start):
//!   for each assigned package, in assignment order:
//!     route  = location → pickup  ⧺  pickup → drop-off   (shared pickup once)
//!     for each hop (from, to) in route:
//!       emit  @clock  at `from`  [load if from is the pickup]  moving → `to`
//!       clock += dist[from][to]
//!     emit  @clock  at drop-off  drop
//!     location = drop-off                                 (clock keeps running)
//! ```
//!
//! A package whose route cannot be built is reported to the observer and
//! skipped; the vehicle carries on from where it stood.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Replays vehicles on Rayon's thread pool.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_itinerary::{NoopObserver, PlannerBuilder};
//!
//! let planner = PlannerBuilder::new(network, packages, vehicles)
//!     .config(config)
//!     .build()?;
//! let summary = planner.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod planner;
pub mod simulator;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use error::{ItineraryError, ItineraryResult};
pub use event::{Move, ScheduleEvent};
pub use observer::{ItineraryObserver, NoopObserver};
pub use planner::{PlanSummary, Planner};
pub use simulator::{ItineraryItem, ItinerarySimulator, VehicleItinerary};
