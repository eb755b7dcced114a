//! Routing trait and route type.
//!
//! # Pluggability
//!
//! Dispatch and itinerary code query distances and routes through the
//! [`Router`] trait, so a different all-pairs backend (or a precomputed
//! table loaded from disk) can be dropped in without touching them.  The
//! default implementation is [`ShortestPaths`](crate::ShortestPaths).
//!
//! # Route accumulation
//!
//! A vehicle trip is two legs, "current location → pickup" then
//! "pickup → drop-off".  [`Router::extend_route`] appends a leg to an
//! existing [`Route`] starting from its last station, so the shared pickup
//! station appears exactly once in the combined sequence.

use fleet_core::{Cost, StationId};

use crate::matrix::Matrix;
use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered list of stations visited along shortest paths, plus its total
/// cost.
///
/// Always holds at least one station and never repeats a station twice in a
/// row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stations: Vec<StationId>,
    cost:     Cost,
}

impl Route {
    /// A zero-length route standing at `station`.
    pub fn starting_at(station: StationId) -> Self {
        Self { stations: vec![station], cost: Cost::ZERO }
    }

    /// Stations in travel order, both endpoints included.
    #[inline]
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Total cost of every leg appended so far.
    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline]
    pub fn first(&self) -> StationId {
        self.stations[0]
    }

    /// The station the route currently ends at.
    #[inline]
    pub fn last(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    /// Number of stations (hops + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// `true` if the route never leaves its starting station.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.stations.len() == 1
    }

    /// Consecutive `(from, to)` station pairs.
    pub fn hops(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.stations.windows(2).map(|w| (w[0], w[1]))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Shortest-path oracle over a fixed station set.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across Rayon workers replaying vehicle itineraries in parallel.
pub trait Router: Send + Sync {
    /// Number of stations the router knows about.
    fn station_count(&self) -> usize;

    /// Shortest-path cost from `from` to `to`; `Cost::INFINITE` if
    /// unreachable.
    ///
    /// # Panics
    ///
    /// May panic if either station is out of range.
    fn distance(&self, from: StationId, to: StationId) -> Cost;

    /// Append the shortest path from `route.last()` to `to`.
    ///
    /// Leaves `route` untouched on error, and when `to` is already the last
    /// station.
    fn extend_route(&self, route: &mut Route, to: StationId) -> NetworkResult<()>;

    /// Shortest route from `from` to `to`.
    fn route(&self, from: StationId, to: StationId) -> NetworkResult<Route> {
        if from.index() >= self.station_count() {
            return Err(NetworkError::StationNotFound(from));
        }
        let mut route = Route::starting_at(from);
        self.extend_route(&mut route, to)?;
        Ok(route)
    }
}

// ── Reconstruction ────────────────────────────────────────────────────────────

/// Append the stations after `route.last()` on the shortest path to `to`.
///
/// Walks `predecessors[from][·]` backwards from `to` until it reaches `from`,
/// then reverses the collected hops in place.  The walk is bounded by the
/// station count: a simple path never has more hops than that, so a longer
/// chain means the matrix was not produced by a completed solve.
pub(crate) fn extend_with_predecessors(
    predecessors: &Matrix<StationId>,
    distance:     Cost,
    route:        &mut Route,
    to:           StationId,
) -> NetworkResult<()> {
    let n    = predecessors.size();
    let from = route.last();
    if to.index() >= n {
        return Err(NetworkError::StationNotFound(to));
    }
    if from == to {
        return Ok(());
    }
    if !distance.is_finite() {
        return Err(NetworkError::NoRoute { from, to });
    }
    let Some(cost) = route.cost.checked_add(distance) else {
        return Err(NetworkError::NoRoute { from, to });
    };

    let start = route.stations.len();
    let mut cur = to;
    loop {
        route.stations.push(cur);
        let prev = predecessors.get(from.index(), cur.index());
        if prev == from {
            break;
        }
        if !prev.is_valid() || route.stations.len() - start >= n {
            route.stations.truncate(start);
            return Err(NetworkError::CorruptPredecessors { from, to });
        }
        cur = prev;
    }
    route.stations[start..].reverse();
    route.cost = cost;
    Ok(())
}
