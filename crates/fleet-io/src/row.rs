//! Plain data row written by output backends.

use serde::Serialize;

/// A [`ScheduleEvent`](fleet_itinerary::ScheduleEvent) with every id
/// replaced by its display name.  `None` fields serialize as empty CSV cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRow<'a> {
    pub vehicle:      &'a str,
    pub time:         u64,
    pub station:      &'a str,
    pub load:         Option<&'a str>,
    pub drop:         Option<&'a str>,
    /// Label of the edge taken next; `None` on the final event of a trip.
    pub edge:         Option<&'a str>,
    pub next_station: Option<&'a str>,
}
