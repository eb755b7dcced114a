//! Fluent builder for constructing a [`Planner`].

use fleet_core::{PackageId, PlannerConfig};
use fleet_dispatch::{
    Assignment, AssignmentStrategy, DispatchContext, NearestVehicle, Package, Vehicle,
};
use fleet_network::{Network, ShortestPaths};

use crate::{ItineraryError, ItineraryResult, Planner};

/// Fluent builder for [`Planner`].
///
/// # Required inputs
///
/// - [`Network`]: stations and edges, from `NetworkBuilder` or the input loader
/// - packages and vehicles, in input order
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                       |
/// |------------------|-------------------------------|
/// | `.config(c)`     | `PlannerConfig::default()`    |
/// | `.strategy(s)`   | [`NearestVehicle`]            |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(network, packages, vehicles)
///     .config(PlannerConfig { fail_fast: true, ..Default::default() })
///     .build()?;
/// planner.run(&mut NoopObserver)?;
/// ```
pub struct PlannerBuilder {
    network:  Network,
    packages: Vec<Package>,
    vehicles: Vec<Vehicle>,
    config:   PlannerConfig,
    strategy: Option<Box<dyn AssignmentStrategy>>,
}

impl PlannerBuilder {
    pub fn new(network: Network, packages: Vec<Package>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            network,
            packages,
            vehicles,
            config:   PlannerConfig::default(),
            strategy: None,
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the default [`NearestVehicle`] assignment.
    pub fn strategy(mut self, strategy: impl AssignmentStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Validate inputs, solve all-pairs shortest paths, run the assignment
    /// strategy, and return a ready-to-run [`Planner`].
    ///
    /// # Errors
    ///
    /// - [`ItineraryError::Config`] for an invalid configuration.
    /// - [`ItineraryError::Network`] if a package or vehicle names a station
    ///   outside the network.
    /// - [`ItineraryError::InvalidAssignment`] if the strategy's output does
    ///   not place every package exactly once within vehicle capacity.
    /// - [`ItineraryError::Dispatch`] for the first unassignable package when
    ///   `fail_fast` is set.
    pub fn build(self) -> ItineraryResult<Planner> {
        self.config.validate()?;

        // ── Validate station references ───────────────────────────────────
        for v in &self.vehicles {
            self.network.check_station(v.start)?;
        }
        for p in &self.packages {
            self.network.check_station(p.source)?;
            self.network.check_station(p.destination)?;
        }

        // ── Solve and assign ──────────────────────────────────────────────
        let paths = ShortestPaths::solve(&self.network);

        let strategy: Box<dyn AssignmentStrategy> = match self.strategy {
            Some(s) => s,
            None    => Box::new(NearestVehicle),
        };
        let ctx = DispatchContext::new(&paths, &self.packages, &self.vehicles);
        let mut assignment = strategy.assign(&ctx);

        check_assignment(&assignment, &self.packages, &self.vehicles)?;

        tracing::debug!(
            packages = self.packages.len(),
            vehicles = self.vehicles.len(),
            assigned = assignment.assigned_count(),
            unassigned = assignment.failures().len(),
            "assignment complete",
        );

        if self.config.fail_fast {
            if let Some(first) = assignment.take_failures().into_iter().next() {
                return Err(ItineraryError::Dispatch(first.error));
            }
        }

        Ok(Planner {
            network:    self.network,
            paths,
            packages:   self.packages,
            vehicles:   self.vehicles,
            assignment,
            config:     self.config,
        })
    }
}

/// Every package must be assigned or rejected exactly once, and only to a
/// vehicle that can carry it.
fn check_assignment(
    assignment: &Assignment,
    packages:   &[Package],
    vehicles:   &[Vehicle],
) -> ItineraryResult<()> {
    let invalid = |reason: String| -> ItineraryResult<()> {
        Err(ItineraryError::InvalidAssignment(reason))
    };

    if assignment.vehicle_count() != vehicles.len() {
        return invalid(format!(
            "{} package lists for {} vehicles",
            assignment.vehicle_count(),
            vehicles.len(),
        ));
    }

    let mut seen = vec![false; packages.len()];
    let mut mark = |id: PackageId| -> ItineraryResult<()> {
        match seen.get_mut(id.index()) {
            None => invalid(format!("unknown package {id}")),
            Some(true) => {
                invalid(format!("package {:?} placed more than once", packages[id.index()].name))
            }
            Some(slot) => {
                *slot = true;
                Ok(())
            }
        }
    };

    for (vehicle, list) in assignment.iter() {
        let v = &vehicles[vehicle.index()];
        for &id in list {
            mark(id)?;
            let p = &packages[id.index()];
            if !v.can_carry(p) {
                return invalid(format!(
                    "package {:?} (weight {}) exceeds capacity {} of vehicle {:?}",
                    p.name, p.weight, v.capacity, v.name,
                ));
            }
        }
    }
    for failure in assignment.failures() {
        mark(failure.package)?;
    }

    match seen.iter().position(|&placed| !placed) {
        Some(i) => {
            invalid(format!("package {:?} neither assigned nor rejected", packages[i].name))
        }
        None => Ok(()),
    }
}
