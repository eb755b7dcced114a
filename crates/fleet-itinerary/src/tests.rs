//! Integration tests for fleet-itinerary.

use std::collections::HashMap;

use fleet_core::{PackageId, PlannerConfig, StationId, Tick, VehicleId};
use fleet_dispatch::{AssignmentFailure, Package, Vehicle};
use fleet_network::{Network, NetworkBuilder};

use crate::{ItineraryError, ItineraryObserver, PlanSummary, ScheduleEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A ──10── B ──5── C, plus an isolated station D.
fn line_network() -> (Network, [StationId; 4]) {
    let mut b = NetworkBuilder::new();
    let a = b.add_station("A").unwrap();
    let s = b.add_station("B").unwrap();
    let c = b.add_station("C").unwrap();
    let d = b.add_station("D").unwrap();
    b.add_edge("AB", a, s, 10).unwrap();
    b.add_edge("BC", s, c, 5).unwrap();
    (b.build(), [a, s, c, d])
}

fn package(name: &str, source: StationId, destination: StationId, weight: u64) -> Package {
    Package { name: name.into(), source, destination, weight }
}

fn vehicle(name: &str, start: StationId, capacity: u64) -> Vehicle {
    Vehicle { name: name.into(), start, capacity }
}

/// Observer that keeps everything it is told.
#[derive(Default)]
struct Collect {
    events:     Vec<ScheduleEvent>,
    failures:   Vec<(VehicleId, PackageId)>,
    unassigned: Vec<PackageId>,
    started:    Vec<VehicleId>,
    finished:   Vec<(VehicleId, Tick)>,
    summary:    Option<PlanSummary>,
}

impl ItineraryObserver for Collect {
    fn on_unassigned(&mut self, failure: &AssignmentFailure) {
        self.unassigned.push(failure.package);
    }
    fn on_vehicle_start(&mut self, vehicle: VehicleId) {
        self.started.push(vehicle);
    }
    fn on_event(&mut self, event: &ScheduleEvent) {
        self.events.push(*event);
    }
    fn on_failure(&mut self, vehicle: VehicleId, package: PackageId, _error: &ItineraryError) {
        self.failures.push((vehicle, package));
    }
    fn on_vehicle_end(&mut self, vehicle: VehicleId, finish: Tick) {
        self.finished.push((vehicle, finish));
    }
    fn on_plan_end(&mut self, summary: &PlanSummary) {
        self.summary = Some(*summary);
    }
}

/// `(time, station, loaded, dropped, next station)` for compact assertions.
fn compact(events: &[ScheduleEvent]) -> Vec<(u64, StationId, Option<PackageId>, Option<PackageId>, Option<StationId>)> {
    events
        .iter()
        .map(|e| (e.time.0, e.station, e.loaded, e.dropped, e.next.map(|m| m.to)))
        .collect()
}

// ── Single-vehicle replay ─────────────────────────────────────────────────────

#[cfg(test)]
mod simulator_tests {
    use fleet_network::ShortestPaths;

    use super::*;
    use crate::ItinerarySimulator;

    const P0: PackageId = PackageId(0);
    const P1: PackageId = PackageId(1);
    const V0: VehicleId = VehicleId(0);

    #[test]
    fn direct_trip_from_pickup() {
        let (net, [a, b, c, _]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("P", a, c, 1)];
        let vehicles = [vehicle("V", a, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let rec = sim.record(V0, &[P0]);
        let events: Vec<_> = rec.events().copied().collect();
        assert_eq!(compact(&events), vec![
            (0,  a, Some(P0), None,     Some(b)),
            (10, b, None,     None,     Some(c)),
            (15, c, None,     Some(P0), None),
        ]);
        assert_eq!(net.edge(events[0].next.unwrap().edge).unwrap().name, "AB");
        assert_eq!(net.edge(events[1].next.unwrap().edge).unwrap().name, "BC");
        assert_eq!(rec.finish, Tick(15));
    }

    #[test]
    fn travels_to_pickup_first() {
        let (net, [a, b, c, _]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("P", a, c, 1)];
        let vehicles = [vehicle("V", c, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let events: Vec<_> = sim.record(V0, &[P0]).events().copied().collect();
        // Starts at the drop-off station but must not drop there.
        assert_eq!(compact(&events), vec![
            (0,  c, None,     None,     Some(b)),
            (5,  b, None,     None,     Some(a)),
            (15, a, Some(P0), None,     Some(b)),
            (25, b, None,     None,     Some(c)),
            (30, c, None,     Some(P0), None),
        ]);
    }

    #[test]
    fn clock_carries_across_packages() {
        let (net, [a, b, c, _]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("P1", a, b, 1), package("P2", b, c, 1)];
        let vehicles = [vehicle("V", a, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let rec = sim.record(V0, &[P0, P1]);
        let events: Vec<_> = rec.events().copied().collect();
        assert_eq!(compact(&events), vec![
            (0,  a, Some(P0), None,     Some(b)),
            (10, b, None,     Some(P0), None),
            (10, b, Some(P1), None,     Some(c)),
            (15, c, None,     Some(P1), None),
        ]);
        assert_eq!(rec.finish, Tick(15));
    }

    #[test]
    fn same_station_package_loads_and_drops_once() {
        let (net, [a, b, _, _]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("P", b, b, 1)];
        let vehicles = [vehicle("V", a, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let events: Vec<_> = sim.record(V0, &[P0]).events().copied().collect();
        assert_eq!(compact(&events), vec![
            (0,  a, None,     None,     Some(b)),
            (10, b, Some(P0), Some(P0), None),
        ]);
    }

    #[test]
    fn unreachable_trip_is_skipped_without_events() {
        let (net, [a, b, c, d]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("lost", d, c, 1), package("ok", a, b, 1)];
        let vehicles = [vehicle("V", a, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let rec = sim.record(V0, &[P0, P1]);
        let failures: Vec<_> = rec.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, P0);
        assert!(matches!(
            failures[0].1,
            ItineraryError::Network(fleet_network::NetworkError::NoRoute { .. })
        ));

        // The next package starts from A at t=0 as if the failed trip never happened.
        let events: Vec<_> = rec.events().copied().collect();
        assert_eq!(compact(&events), vec![
            (0,  a, Some(P1), None,     Some(b)),
            (10, b, None,     Some(P1), None),
        ]);
    }

    #[test]
    fn replay_matches_live_run() {
        let (net, [a, _, c, _]) = line_network();
        let paths = ShortestPaths::solve(&net);
        let packages = [package("P", c, a, 1)];
        let vehicles = [vehicle("V", a, 5)];
        let sim = ItinerarySimulator::new(&net, &paths, &packages, &vehicles);

        let mut live = Collect::default();
        let finish = sim.run_vehicle(V0, &[P0], &mut live);

        let mut replayed = Collect::default();
        sim.record(V0, &[P0]).replay(&mut replayed);

        assert_eq!(live.events, replayed.events);
        assert_eq!(live.finished, vec![(V0, finish)]);
        assert_eq!(replayed.finished, live.finished);
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use fleet_dispatch::{Assignment, AssignmentStrategy, DispatchContext, DispatchError};

    use super::*;
    use crate::{NoopObserver, PlannerBuilder};

    #[test]
    fn single_package_end_to_end() {
        let (net, [a, _, c, _]) = line_network();
        let planner = PlannerBuilder::new(net, vec![package("P", a, c, 1)], vec![vehicle("V", a, 5)])
            .build()
            .unwrap();

        let mut obs = Collect::default();
        let summary = planner.run(&mut obs).unwrap();
        assert_eq!(summary, PlanSummary {
            vehicles:   1,
            events:     3,
            delivered:  1,
            unassigned: 0,
            failed:     0,
            makespan:   Tick(15),
        });
        assert_eq!(obs.summary, Some(summary));
    }

    #[test]
    fn small_vehicle_never_gets_heavy_package() {
        let (net, [a, _, c, _]) = line_network();
        let planner = PlannerBuilder::new(
            net,
            vec![package("P", a, c, 4)],
            vec![vehicle("V", a, 5), vehicle("W", c, 3)],
        )
        .build()
        .unwrap();

        assert_eq!(planner.assignment().vehicle_of(PackageId(0)), Some(VehicleId(0)));
        let mut obs = Collect::default();
        planner.run(&mut obs).unwrap();
        assert!(obs.events.iter().all(|e| e.vehicle == VehicleId(0)));
        assert_eq!(obs.started, vec![VehicleId(0), VehicleId(1)], "idle vehicles are still reported");
    }

    #[test]
    fn unreachable_package_is_reported_not_fatal() {
        let (net, [a, b, c, d]) = line_network();
        let planner = PlannerBuilder::new(
            net,
            vec![package("lost", d, c, 1), package("ok", a, b, 1)],
            vec![vehicle("V", a, 5)],
        )
        .build()
        .unwrap();

        let mut obs = Collect::default();
        let summary = planner.run(&mut obs).unwrap();
        assert_eq!(obs.unassigned, vec![PackageId(0)]);
        assert_eq!(summary.unassigned, 1);
        assert_eq!(summary.delivered, 1);
    }

    #[test]
    fn fail_fast_aborts_on_first_unassignable() {
        let (net, [a, _, c, _]) = line_network();
        let result = PlannerBuilder::new(
            net,
            vec![package("heavy", a, c, 99)],
            vec![vehicle("V", a, 5)],
        )
        .config(PlannerConfig { fail_fast: true, ..Default::default() })
        .build();
        assert!(matches!(
            result,
            Err(ItineraryError::Dispatch(DispatchError::InsufficientCapacity { weight: 99, .. }))
        ));
    }

    #[test]
    fn out_of_range_station_rejected() {
        let (net, [a, ..]) = line_network();
        let result = PlannerBuilder::new(net, vec![], vec![vehicle("V", StationId(12), 5)]).build();
        assert!(matches!(result, Err(ItineraryError::Network(_))));
        let (net, _) = line_network();
        let result = PlannerBuilder::new(net, vec![package("P", a, StationId(12), 1)], vec![]).build();
        assert!(matches!(result, Err(ItineraryError::Network(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let (net, _) = line_network();
        let result = PlannerBuilder::new(net, vec![], vec![])
            .config(PlannerConfig { num_threads: Some(0), ..Default::default() })
            .build();
        assert!(matches!(result, Err(ItineraryError::Config(_))));
    }

    #[test]
    fn custom_strategy_drives_the_replay() {
        struct AllToLast;
        impl AssignmentStrategy for AllToLast {
            fn assign(&self, ctx: &DispatchContext<'_>) -> Assignment {
                let mut a = Assignment::new(ctx.vehicles.len());
                let last = ctx.vehicles.len().checked_sub(1).map(|i| VehicleId(i as u32));
                for (i, p) in ctx.packages.iter().enumerate() {
                    let id = PackageId(i as u32);
                    match last {
                        Some(v) => a.push(v, id),
                        None => a.reject(id, DispatchError::InsufficientCapacity {
                            package:      p.name.clone(),
                            weight:       p.weight,
                            max_capacity: None,
                        }),
                    }
                }
                a
            }
        }

        let (net, [a, _, c, _]) = line_network();
        let planner = PlannerBuilder::new(
            net,
            vec![package("P", a, c, 1)],
            vec![vehicle("V", a, 5), vehicle("W", c, 5)],
        )
        .strategy(AllToLast)
        .build()
        .unwrap();
        let rec = planner.itinerary(VehicleId(1));
        assert_eq!(rec.events().count(), 5);
        assert_eq!(rec.finish, Tick(30));

        let (net, _) = line_network();
        let planner = PlannerBuilder::new(net, vec![package("P", a, c, 1)], vec![])
            .strategy(AllToLast)
            .build()
            .unwrap();
        assert_eq!(planner.run(&mut NoopObserver).unwrap().unassigned, 1);
    }

    /// Returns a fixed assignment regardless of the context.
    struct Fixed {
        lists:    Vec<Vec<u32>>,
        rejected: Vec<u32>,
    }

    impl AssignmentStrategy for Fixed {
        fn assign(&self, _ctx: &DispatchContext<'_>) -> Assignment {
            let mut a = Assignment::new(self.lists.len());
            for (v, list) in self.lists.iter().enumerate() {
                for &p in list {
                    a.push(VehicleId(v as u32), PackageId(p));
                }
            }
            for &p in &self.rejected {
                a.reject(PackageId(p), DispatchError::InsufficientCapacity {
                    package:      format!("p{p}"),
                    weight:       0,
                    max_capacity: None,
                });
            }
            a
        }
    }

    fn build_with(strategy: Fixed) -> Result<crate::Planner, ItineraryError> {
        let (net, [a, b, c, _]) = line_network();
        PlannerBuilder::new(
            net,
            vec![package("light", a, c, 1), package("heavy", b, a, 4)],
            vec![vehicle("V", a, 5), vehicle("W", c, 2)],
        )
        .strategy(strategy)
        .build()
    }

    #[test]
    fn strategy_output_is_checked() {
        let cases = [
            // Unknown package id.
            Fixed { lists: vec![vec![0, 1, 7], vec![]], rejected: vec![] },
            // Package assigned twice.
            Fixed { lists: vec![vec![0, 1], vec![0]], rejected: vec![] },
            // Assigned and rejected.
            Fixed { lists: vec![vec![0, 1], vec![]], rejected: vec![1] },
            // Over capacity.
            Fixed { lists: vec![vec![0], vec![1]], rejected: vec![] },
            // Silently dropped.
            Fixed { lists: vec![vec![0], vec![]], rejected: vec![] },
            // Wrong number of vehicle lists.
            Fixed { lists: vec![vec![0, 1]], rejected: vec![] },
        ];
        for (i, strategy) in cases.into_iter().enumerate() {
            assert!(
                matches!(build_with(strategy), Err(ItineraryError::InvalidAssignment(_))),
                "case {i} accepted",
            );
        }
    }

    #[test]
    fn valid_custom_assignment_is_accepted() {
        let planner = build_with(Fixed { lists: vec![vec![1], vec![0]], rejected: vec![] }).unwrap();
        assert_eq!(planner.assignment().vehicle_of(PackageId(1)), Some(VehicleId(0)));
        let planner = build_with(Fixed { lists: vec![vec![0], vec![]], rejected: vec![1] }).unwrap();
        assert_eq!(planner.assignment().failures().len(), 1);
        assert_eq!(planner.run(&mut NoopObserver).unwrap().unassigned, 1);
    }

    #[test]
    fn runs_are_repeatable() {
        let (net, [a, b, c, _]) = line_network();
        let planner = PlannerBuilder::new(
            net,
            vec![package("P1", a, c, 1), package("P2", c, a, 1), package("P3", b, c, 1)],
            vec![vehicle("V", a, 5), vehicle("W", b, 5)],
        )
        .build()
        .unwrap();
        let first = planner.run(&mut NoopObserver).unwrap();
        let second = planner.run(&mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }
}

// ── Schedule invariants ───────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;
    use crate::PlannerBuilder;

    /// Diamond with a tail: several vehicles, crossing deliveries.
    ///
    /// ```text
    ///      B
    ///   3 / \ 4
    ///    A   D ──7── E
    ///   6 \ / 2
    ///      C
    /// ```
    fn busy_run() -> (Vec<Package>, Collect) {
        let mut b = NetworkBuilder::new();
        let ids: Vec<StationId> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|n| b.add_station(*n).unwrap())
            .collect();
        let [a, s, c, d, e] = [ids[0], ids[1], ids[2], ids[3], ids[4]];
        b.add_edge("ab", a, s, 3).unwrap();
        b.add_edge("bd", s, d, 4).unwrap();
        b.add_edge("ac", a, c, 6).unwrap();
        b.add_edge("cd", c, d, 2).unwrap();
        b.add_edge("de", d, e, 7).unwrap();

        let packages = vec![
            package("p0", a, e, 2),
            package("p1", e, c, 1),
            package("p2", c, s, 5),
            package("p3", d, d, 1),
            package("p4", s, a, 3),
            package("p5", e, a, 5),
        ];
        let vehicles = vec![vehicle("v0", a, 5), vehicle("v1", e, 2), vehicle("v2", c, 8)];

        let planner = PlannerBuilder::new(b.build(), packages.clone(), vehicles)
            .build()
            .unwrap();
        let mut obs = Collect::default();
        let summary = planner.run(&mut obs).unwrap();
        assert_eq!(summary.delivered, packages.len());
        assert_eq!(summary.failed + summary.unassigned, 0);
        (packages, obs)
    }

    #[test]
    fn clock_is_monotonic_and_advances_by_move_cost() {
        let (_, obs) = busy_run();
        let mut by_vehicle: HashMap<VehicleId, Vec<&ScheduleEvent>> = HashMap::new();
        for e in &obs.events {
            by_vehicle.entry(e.vehicle).or_default().push(e);
        }
        for events in by_vehicle.values() {
            for pair in events.windows(2) {
                let (prev, next) = (pair[0], pair[1]);
                assert!(prev.time <= next.time);
                match prev.next {
                    Some(m) => {
                        assert_eq!(next.station, m.to);
                        assert_eq!(Some(next.time.since(prev.time)), m.cost.value());
                    }
                    // A new trip starts where the last one dropped, same clock.
                    None => {
                        assert_eq!(next.station, prev.station);
                        assert_eq!(next.time, prev.time);
                    }
                }
            }
        }
    }

    #[test]
    fn each_package_loaded_and_dropped_exactly_once() {
        let (packages, obs) = busy_run();
        for (i, p) in packages.iter().enumerate() {
            let id = PackageId(i as u32);
            let loads: Vec<_> = obs.events.iter().filter(|e| e.loaded == Some(id)).collect();
            let drops: Vec<_> = obs.events.iter().filter(|e| e.dropped == Some(id)).collect();
            assert_eq!(loads.len(), 1, "{} loads", p.name);
            assert_eq!(drops.len(), 1, "{} drops", p.name);
            assert_eq!(loads[0].station, p.source);
            assert_eq!(drops[0].station, p.destination);
            assert!(loads[0].time <= drops[0].time);
        }
    }

    #[test]
    fn no_repeated_consecutive_stations_within_a_trip() {
        let (_, obs) = busy_run();
        for e in &obs.events {
            if let Some(m) = e.next {
                assert_ne!(m.to, e.station);
            }
        }
    }
}
