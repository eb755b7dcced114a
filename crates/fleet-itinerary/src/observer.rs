//! Observer trait for streaming itinerary output.

use fleet_core::{PackageId, Tick, VehicleId};
use fleet_dispatch::AssignmentFailure;

use crate::{ItineraryError, PlanSummary, ScheduleEvent};

/// Callbacks invoked by [`Planner::run`][crate::Planner::run] while vehicles
/// are replayed.
///
/// Vehicles are reported one after another in `VehicleId` order, each
/// bracketed by `on_vehicle_start` / `on_vehicle_end`.  All methods have
/// default no-op implementations.
///
/// # Example: drop counter
///
/// ```rust,ignore
/// struct Drops(usize);
///
/// impl ItineraryObserver for Drops {
///     fn on_event(&mut self, event: &ScheduleEvent) {
///         self.0 += event.dropped.is_some() as usize;
///     }
/// }
/// ```
pub trait ItineraryObserver {
    /// Called once per package the assignment strategy could not place,
    /// before any vehicle is replayed.
    fn on_unassigned(&mut self, _failure: &AssignmentFailure) {}

    fn on_vehicle_start(&mut self, _vehicle: VehicleId) {}

    /// Called for every event, in time order within a vehicle.
    fn on_event(&mut self, _event: &ScheduleEvent) {}

    /// Called when an assigned package's trip could not be built.
    fn on_failure(&mut self, _vehicle: VehicleId, _package: PackageId, _error: &ItineraryError) {}

    /// `finish` is the vehicle's clock after its last delivered package.
    fn on_vehicle_end(&mut self, _vehicle: VehicleId, _finish: Tick) {}

    /// Called once after every vehicle has been replayed.
    fn on_plan_end(&mut self, _summary: &PlanSummary) {}
}

/// An [`ItineraryObserver`] that does nothing.
pub struct NoopObserver;

impl ItineraryObserver for NoopObserver {}
