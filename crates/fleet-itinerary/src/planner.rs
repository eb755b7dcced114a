//! The `Planner` struct and its replay loop.

use fleet_core::{PackageId, PlannerConfig, Tick, VehicleId};
use fleet_dispatch::{Assignment, AssignmentFailure, Package, Vehicle};
use fleet_network::{Network, ShortestPaths};

use crate::simulator::{ItinerarySimulator, VehicleItinerary};
use crate::{ItineraryError, ItineraryObserver, ItineraryResult, ScheduleEvent};

// ── PlanSummary ───────────────────────────────────────────────────────────────

/// Totals reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub vehicles:   usize,
    pub events:     usize,
    /// Packages dropped at their destination.
    pub delivered:  usize,
    /// Packages the assignment strategy could not place.
    pub unassigned: usize,
    /// Assigned packages whose trip could not be built.
    pub failed:     usize,
    /// Latest finishing clock across all vehicles.
    pub makespan:   Tick,
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Solved network plus a frozen assignment, ready to be replayed.
///
/// Create via [`PlannerBuilder`][crate::PlannerBuilder].  Everything is
/// read-only after construction, so `run` may be called any number of times
/// and always produces the same output.
pub struct Planner {
    pub(crate) network:    Network,
    pub(crate) paths:      ShortestPaths,
    pub(crate) packages:   Vec<Package>,
    pub(crate) vehicles:   Vec<Vehicle>,
    pub(crate) assignment: Assignment,
    pub(crate) config:     PlannerConfig,
}

impl Planner {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn network(&self) -> &Network { &self.network }
    pub fn paths(&self) -> &ShortestPaths { &self.paths }
    pub fn packages(&self) -> &[Package] { &self.packages }
    pub fn vehicles(&self) -> &[Vehicle] { &self.vehicles }
    pub fn assignment(&self) -> &Assignment { &self.assignment }
    pub fn config(&self) -> &PlannerConfig { &self.config }

    pub fn simulator(&self) -> ItinerarySimulator<'_> {
        ItinerarySimulator::new(&self.network, &self.paths, &self.packages, &self.vehicles)
    }

    /// Replay a single vehicle into memory.
    pub fn itinerary(&self, vehicle: VehicleId) -> VehicleItinerary {
        self.simulator()
            .record(vehicle, self.assignment.packages_for(vehicle))
    }

    // ── Run ───────────────────────────────────────────────────────────────

    /// Replay every vehicle, streaming events to `observer` in vehicle order.
    ///
    /// Unassigned packages are reported first via `on_unassigned`.  With the
    /// `parallel` feature, vehicles are simulated on Rayon workers and their
    /// recordings replayed to `observer` in order afterwards.
    pub fn run<O: ItineraryObserver>(&self, observer: &mut O) -> ItineraryResult<PlanSummary> {
        let mut tally = Tally::new(observer);

        for failure in self.assignment.failures() {
            tally.on_unassigned(failure);
        }

        #[cfg(not(feature = "parallel"))]
        {
            let sim = self.simulator();
            for (vehicle, packages) in self.assignment.iter() {
                sim.run_vehicle(vehicle, packages, &mut tally);
            }
        }

        #[cfg(feature = "parallel")]
        {
            for record in self.record_all()? {
                record.replay(&mut tally);
            }
        }

        let summary = tally.summary;
        tracing::debug!(
            events = summary.events,
            delivered = summary.delivered,
            failed = summary.failed,
            makespan = summary.makespan.0,
            "plan replayed",
        );
        tally.inner.on_plan_end(&summary);
        Ok(summary)
    }

    /// Simulate every vehicle on the Rayon pool, preserving vehicle order.
    #[cfg(feature = "parallel")]
    fn record_all(&self) -> ItineraryResult<Vec<VehicleItinerary>> {
        use rayon::prelude::*;

        let sim = self.simulator();
        let work: Vec<(VehicleId, &[PackageId])> = self.assignment.iter().collect();
        let simulate = || {
            work.par_iter()
                .map(|&(vehicle, packages)| sim.record(vehicle, packages))
                .collect()
        };

        match self.config.num_threads {
            None => Ok(simulate()),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ItineraryError::ThreadPool(e.to_string()))?;
                Ok(pool.install(simulate))
            }
        }
    }
}

// ── Tally ─────────────────────────────────────────────────────────────────────

/// Forwards to the caller's observer while counting for [`PlanSummary`].
struct Tally<'o, O: ItineraryObserver> {
    inner:   &'o mut O,
    summary: PlanSummary,
}

impl<'o, O: ItineraryObserver> Tally<'o, O> {
    fn new(inner: &'o mut O) -> Self {
        Self { inner, summary: PlanSummary::default() }
    }
}

impl<O: ItineraryObserver> ItineraryObserver for Tally<'_, O> {
    fn on_unassigned(&mut self, failure: &AssignmentFailure) {
        self.summary.unassigned += 1;
        self.inner.on_unassigned(failure);
    }

    fn on_vehicle_start(&mut self, vehicle: VehicleId) {
        self.summary.vehicles += 1;
        self.inner.on_vehicle_start(vehicle);
    }

    fn on_event(&mut self, event: &ScheduleEvent) {
        self.summary.events += 1;
        if event.dropped.is_some() {
            self.summary.delivered += 1;
        }
        self.inner.on_event(event);
    }

    fn on_failure(
        &mut self,
        vehicle: VehicleId,
        package: PackageId,
        error:   &ItineraryError,
    ) {
        self.summary.failed += 1;
        self.inner.on_failure(vehicle, package, error);
    }

    fn on_vehicle_end(&mut self, vehicle: VehicleId, finish: Tick) {
        self.summary.makespan = self.summary.makespan.max(finish);
        self.inner.on_vehicle_end(vehicle, finish);
    }
}
