//! Pluggable assignment strategies.
//!
//! # Extension point
//!
//! The planner only ever calls [`AssignmentStrategy::assign`], so an optimal
//! capacitated-routing solver can replace [`NearestVehicle`] without touching
//! the shortest-path or itinerary code.  Strategies must be deterministic for
//! a given context.

use fleet_core::{Cost, PackageId, StationId, VehicleId};
use fleet_network::{NetworkError, Router};

use crate::model::{Package, Vehicle, VehicleCursor};
use crate::{Assignment, DispatchError, DispatchResult};

// ── DispatchContext ───────────────────────────────────────────────────────────

/// Read-only inputs handed to a strategy.
#[derive(Clone, Copy)]
pub struct DispatchContext<'a> {
    /// Solved shortest paths over the station graph.
    pub router:   &'a dyn Router,
    /// Packages in input order; `PackageId(i)` is `packages[i]`.
    pub packages: &'a [Package],
    /// Vehicles in input order; `VehicleId(i)` is `vehicles[i]`.
    pub vehicles: &'a [Vehicle],
}

impl<'a> DispatchContext<'a> {
    pub fn new(router: &'a dyn Router, packages: &'a [Package], vehicles: &'a [Vehicle]) -> Self {
        Self { router, packages, vehicles }
    }

    /// Fresh working records, one per vehicle, positioned at their starts.
    pub fn cursors(&self) -> Vec<VehicleCursor> {
        self.vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| VehicleCursor::new(VehicleId(i as u32), v))
            .collect()
    }
}

// ── AssignmentStrategy trait ──────────────────────────────────────────────────

/// Decides which vehicle delivers each package, and in which order.
///
/// Implementations report packages they cannot place through
/// [`Assignment::reject`] instead of failing the whole run.
pub trait AssignmentStrategy: Send + Sync {
    fn assign(&self, ctx: &DispatchContext<'_>) -> Assignment;
}

// ── NearestVehicle ────────────────────────────────────────────────────────────

/// Greedy one-package-at-a-time assignment.
///
/// Packages are taken in input order.  Each goes to the vehicle whose
/// current location is closest (by shortest-path cost) to the package's
/// pickup, among vehicles whose capacity covers the weight.  Ties go to the
/// vehicle listed first.  The chosen vehicle's location then jumps to the
/// drop-off.  Earlier choices are never revisited, so the result is not
/// optimal in total travel time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestVehicle;

impl AssignmentStrategy for NearestVehicle {
    fn assign(&self, ctx: &DispatchContext<'_>) -> Assignment {
        let mut assignment = Assignment::new(ctx.vehicles.len());
        let mut cursors = ctx.cursors();

        for (i, package) in ctx.packages.iter().enumerate() {
            let id = PackageId(i as u32);
            match nearest_capable(ctx.router, &cursors, package) {
                Ok(vehicle) => {
                    tracing::debug!(
                        package = %package.name,
                        vehicle = %ctx.vehicles[vehicle.index()].name,
                        "package assigned",
                    );
                    cursors[vehicle.index()].accept(package);
                    assignment.push(vehicle, id);
                }
                Err(error) => {
                    tracing::warn!(package = %package.name, %error, "package not assigned");
                    assignment.reject(id, error);
                }
            }
        }

        assignment
    }
}

/// Pick the capable vehicle closest to `package`'s pickup.
///
/// # Errors
///
/// - [`DispatchError::Network`] if the package references a station the
///   router does not know.
/// - [`DispatchError::Undeliverable`] if the drop-off cannot be reached from
///   the pickup at all.
/// - [`DispatchError::InsufficientCapacity`] if no vehicle can carry it.
/// - [`DispatchError::PickupUnreachable`] if every capable vehicle is cut off
///   from the pickup.
pub fn nearest_capable(
    router:  &dyn Router,
    cursors: &[VehicleCursor],
    package: &Package,
) -> DispatchResult<VehicleId> {
    check_station(router, package, package.source)?;
    check_station(router, package, package.destination)?;

    if !router.distance(package.source, package.destination).is_finite() {
        return Err(DispatchError::Undeliverable {
            package: package.name.clone(),
            from:    package.source,
            to:      package.destination,
        });
    }

    let mut best: Option<(VehicleId, Cost)> = None;
    for cursor in cursors.iter().filter(|c| package.weight <= c.capacity) {
        let d = if cursor.location.index() < router.station_count() {
            router.distance(cursor.location, package.source)
        } else {
            Cost::INFINITE
        };
        // Strict `<` keeps the first vehicle on ties.
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((cursor.vehicle, d));
        }
    }

    match best {
        None => Err(DispatchError::InsufficientCapacity {
            package:      package.name.clone(),
            weight:       package.weight,
            max_capacity: cursors.iter().map(|c| c.capacity).max(),
        }),
        Some((_, d)) if !d.is_finite() => Err(DispatchError::PickupUnreachable {
            package: package.name.clone(),
            pickup:  package.source,
        }),
        Some((vehicle, _)) => Ok(vehicle),
    }
}

fn check_station(router: &dyn Router, package: &Package, station: StationId) -> DispatchResult<()> {
    if station.index() < router.station_count() {
        Ok(())
    } else {
        Err(DispatchError::Network {
            package: package.name.clone(),
            source:  NetworkError::StationNotFound(station),
        })
    }
}
