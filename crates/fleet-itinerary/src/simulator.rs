//! Per-vehicle itinerary replay.

use fleet_core::{PackageId, StationId, Tick, VehicleId};
use fleet_dispatch::{Package, Vehicle};
use fleet_network::{Network, Route, Router};

use crate::event::{Move, ScheduleEvent};
use crate::{ItineraryError, ItineraryObserver, ItineraryResult};

// ── ItinerarySimulator ────────────────────────────────────────────────────────

/// Turns one vehicle's package list into timed [`ScheduleEvent`]s.
///
/// Holds only shared references, so one simulator can serve every vehicle
/// (and every Rayon worker) at once.
#[derive(Clone, Copy)]
pub struct ItinerarySimulator<'a> {
    pub network:  &'a Network,
    pub router:   &'a dyn Router,
    pub packages: &'a [Package],
    pub vehicles: &'a [Vehicle],
}

impl<'a> ItinerarySimulator<'a> {
    pub fn new(
        network:  &'a Network,
        router:   &'a dyn Router,
        packages: &'a [Package],
        vehicles: &'a [Vehicle],
    ) -> Self {
        Self { network, router, packages, vehicles }
    }

    /// Replay `vehicle` delivering `packages` in order, streaming to
    /// `observer`.  Returns the vehicle's final clock.
    ///
    /// A trip that fails is reported through
    /// [`ItineraryObserver::on_failure`] without emitting any of its events;
    /// the vehicle keeps its location and clock and moves on.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` or any package id is out of range.
    pub fn run_vehicle<O: ItineraryObserver + ?Sized>(
        &self,
        vehicle:  VehicleId,
        packages: &[PackageId],
        observer: &mut O,
    ) -> Tick {
        observer.on_vehicle_start(vehicle);
        let finish = self.replay(vehicle, packages, |item| match item {
            ItineraryItem::Event(e)      => observer.on_event(&e),
            ItineraryItem::Failure(p, e) => observer.on_failure(vehicle, p, &e),
        });
        observer.on_vehicle_end(vehicle, finish);
        finish
    }

    /// Replay `vehicle` into an owned [`VehicleItinerary`].
    pub fn record(&self, vehicle: VehicleId, packages: &[PackageId]) -> VehicleItinerary {
        let mut items = Vec::new();
        let finish = self.replay(vehicle, packages, |item| items.push(item));
        VehicleItinerary { vehicle, items, finish }
    }

    fn replay(
        &self,
        vehicle:  VehicleId,
        packages: &[PackageId],
        mut sink: impl FnMut(ItineraryItem),
    ) -> Tick {
        let mut clock    = Tick::ZERO;
        let mut location = self.vehicles[vehicle.index()].start;

        for &id in packages {
            let package = &self.packages[id.index()];
            match self.trip(vehicle, location, clock, id) {
                Ok((events, finish)) => {
                    events.into_iter().map(ItineraryItem::Event).for_each(&mut sink);
                    clock    = finish;
                    location = package.destination;
                }
                Err(error) => {
                    tracing::warn!(
                        vehicle = %self.vehicles[vehicle.index()].name,
                        package = %package.name,
                        %error,
                        "trip skipped",
                    );
                    sink(ItineraryItem::Failure(id, error));
                }
            }
        }
        clock
    }

    /// Build the events of a single trip starting at `location`, `clock`.
    ///
    /// Loading is marked where the pickup leg ends and dropping on the final
    /// event, so each trip loads and drops its package exactly once even if
    /// the route passes through either station on the way.
    fn trip(
        &self,
        vehicle:  VehicleId,
        location: StationId,
        clock:    Tick,
        id:       PackageId,
    ) -> ItineraryResult<(Vec<ScheduleEvent>, Tick)> {
        let package = &self.packages[id.index()];

        let mut route = Route::starting_at(location);
        self.router.extend_route(&mut route, package.source)?;
        let pickup_at = route.len() - 1;
        self.router.extend_route(&mut route, package.destination)?;

        let mut events = Vec::with_capacity(route.len());
        let mut time   = clock;
        for (i, (from, to)) in route.hops().enumerate() {
            let edge = self
                .network
                .edge_id_between(from, to)
                .ok_or(ItineraryError::MissingEdge { from, to })?;
            let cost = self.router.distance(from, to);
            events.push(ScheduleEvent {
                time,
                station: from,
                vehicle,
                loaded:  (i == pickup_at).then_some(id),
                dropped: None,
                next:    Some(Move { edge, to, cost }),
            });
            time = time.after(cost).ok_or(ItineraryError::ClockOverflow(vehicle))?;
        }

        events.push(ScheduleEvent {
            time,
            station: route.last(),
            vehicle,
            loaded:  (pickup_at == route.len() - 1).then_some(id),
            dropped: Some(id),
            next:    None,
        });

        Ok((events, time))
    }
}

// ── VehicleItinerary ──────────────────────────────────────────────────────────

/// One entry of a recorded itinerary, in emission order.
#[derive(Debug)]
pub enum ItineraryItem {
    Event(ScheduleEvent),
    Failure(PackageId, ItineraryError),
}

/// A vehicle's replay captured in memory.
///
/// Used by the parallel planner (record on workers, replay in order) and
/// handy in tests.
#[derive(Debug)]
pub struct VehicleItinerary {
    pub vehicle: VehicleId,
    pub items:   Vec<ItineraryItem>,
    /// Clock after the last delivered package.
    pub finish:  Tick,
}

impl VehicleItinerary {
    /// Recorded events, skipping failures.
    pub fn events(&self) -> impl Iterator<Item = &ScheduleEvent> + '_ {
        self.items.iter().filter_map(|item| match item {
            ItineraryItem::Event(e) => Some(e),
            ItineraryItem::Failure(..) => None,
        })
    }

    /// Recorded trip failures.
    pub fn failures(&self) -> impl Iterator<Item = (PackageId, &ItineraryError)> + '_ {
        self.items.iter().filter_map(|item| match item {
            ItineraryItem::Failure(p, e) => Some((*p, e)),
            ItineraryItem::Event(_) => None,
        })
    }

    /// Feed the recording to `observer` exactly as a live replay would.
    pub fn replay<O: ItineraryObserver + ?Sized>(&self, observer: &mut O) {
        observer.on_vehicle_start(self.vehicle);
        for item in &self.items {
            match item {
                ItineraryItem::Event(e)      => observer.on_event(e),
                ItineraryItem::Failure(p, e) => observer.on_failure(self.vehicle, *p, e),
            }
        }
        observer.on_vehicle_end(self.vehicle, self.finish);
    }
}
