//! `OutputObserver<W>`: bridges `ItineraryObserver` to an `EventWriter`.

use fleet_core::{PackageId, StationId, Tick, VehicleId};
use fleet_itinerary::{ItineraryObserver, PlanSummary, Planner, ScheduleEvent};

use crate::row::EventRow;
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// An [`ItineraryObserver`] that resolves ids to names through the
/// [`Planner`] and writes every event to any [`EventWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `planner.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct OutputObserver<'p, W: EventWriter> {
    writer:     W,
    planner:    &'p Planner,
    last_error: Option<OutputError>,
}

impl<'p, W: EventWriter> OutputObserver<'p, W> {
    pub fn new(writer: W, planner: &'p Planner) -> Self {
        Self { writer, planner, last_error: None }
    }

    /// Take the stored write error (if any) after `planner.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect a buffer after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

// Ids come from the planner itself, so lookups only miss for a foreign event.
fn station<'p>(planner: &'p Planner, id: StationId) -> &'p str {
    planner.network().station_name(id).unwrap_or("?")
}

fn vehicle<'p>(planner: &'p Planner, id: VehicleId) -> &'p str {
    planner.vehicles().get(id.index()).map_or("?", |v| v.name.as_str())
}

fn package<'p>(planner: &'p Planner, id: PackageId) -> &'p str {
    planner.packages().get(id.index()).map_or("?", |p| p.name.as_str())
}

impl<W: EventWriter> ItineraryObserver for OutputObserver<'_, W> {
    fn on_vehicle_start(&mut self, id: VehicleId) {
        let result = self.writer.begin_vehicle(vehicle(self.planner, id));
        self.store_err(result);
    }

    fn on_event(&mut self, event: &ScheduleEvent) {
        let p = self.planner;
        let row = EventRow {
            vehicle:      vehicle(p, event.vehicle),
            time:         event.time.0,
            station:      station(p, event.station),
            load:         event.loaded.map(|id| package(p, id)),
            drop:         event.dropped.map(|id| package(p, id)),
            edge:         event
                .next
                .and_then(|m| p.network().edge(m.edge))
                .map(|e| e.name.as_str()),
            next_station: event.next.map(|m| station(p, m.to)),
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_vehicle_end(&mut self, id: VehicleId, _finish: Tick) {
        let result = self.writer.end_vehicle(vehicle(self.planner, id));
        self.store_err(result);
    }

    fn on_plan_end(&mut self, _summary: &PlanSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
