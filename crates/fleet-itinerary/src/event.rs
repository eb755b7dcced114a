//! Schedule events, the final output of the planner.

use fleet_core::{Cost, EdgeId, PackageId, StationId, Tick, VehicleId};

/// The move a vehicle makes when leaving an event's station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    /// Edge taken; its display label names the move.
    pub edge: EdgeId,
    /// Station reached at the end of the move.
    pub to:   StationId,
    /// Travel time of the move.
    pub cost: Cost,
}

/// One timestamped state change of a vehicle at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEvent {
    /// Elapsed time on the vehicle's clock.
    pub time:    Tick,
    pub station: StationId,
    pub vehicle: VehicleId,
    /// Package loaded here, if any.
    pub loaded:  Option<PackageId>,
    /// Package dropped here, if any.
    pub dropped: Option<PackageId>,
    /// Next move, `None` on the final event of a trip.
    pub next:    Option<Move>,
}

impl ScheduleEvent {
    /// `true` for the drop-off event that closes a trip.
    #[inline]
    pub fn is_trip_end(&self) -> bool {
        self.next.is_none()
    }
}
