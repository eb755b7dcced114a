//! All-pairs shortest paths (Floyd-Warshall) with path reconstruction.
//!
//! # Algorithm
//!
//! ```text
//! for k in 0..n:                  ← intermediate station, must be outermost
//!   for v in 0..n:
//!     for u in 0..n:
//!       if dist[v][k] + dist[k][u] < dist[v][u]:
//!         dist[v][u] = dist[v][k] + dist[k][u]
//!         pred[v][u] = pred[k][u]
//! ```
//!
//! Sums are only formed from finite terms (see [`Cost::checked_add`]), so an
//! unreachable pair stays `INFINITE` and never wraps into a small number.
//!
//! O(N³) time, O(N²) space.  The solved matrices are read-only afterwards.

use fleet_core::{Cost, StationId};

use crate::matrix::Matrix;
use crate::network::Network;
use crate::router::{extend_with_predecessors, Route, Router};
use crate::{NetworkError, NetworkResult};

/// Solved distance and predecessor matrices for one [`Network`].
///
/// `distance(v, u)` is the minimum total edge weight from `v` to `u`, and
/// `predecessor(v, u)` is the station directly before `u` on one such path
/// (`v` itself when `u` is a direct neighbour, `u` when `v == u`).
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    distances:    Matrix<Cost>,
    predecessors: Matrix<StationId>,
}

impl ShortestPaths {
    /// Run Floyd-Warshall over `network`'s weight and predecessor seeds.
    pub fn solve(network: &Network) -> Self {
        let (distances, predecessors) =
            floyd_warshall(network.weights.clone(), network.predecessors.clone());
        Self { distances, predecessors }
    }

    /// Shortest-path cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either station is out of range.
    #[inline]
    pub fn distance(&self, from: StationId, to: StationId) -> Cost {
        self.distances.get(from.index(), to.index())
    }

    /// Station directly preceding `to` on the shortest path from `from`;
    /// `StationId::INVALID` if unreachable.
    #[inline]
    pub fn predecessor(&self, from: StationId, to: StationId) -> StationId {
        self.predecessors.get(from.index(), to.index())
    }

    /// `true` if `to` can be reached from `from`.
    #[inline]
    pub fn is_reachable(&self, from: StationId, to: StationId) -> bool {
        self.distance(from, to).is_finite()
    }

    pub fn distances(&self) -> &Matrix<Cost> {
        &self.distances
    }

    pub fn predecessors(&self) -> &Matrix<StationId> {
        &self.predecessors
    }

    pub fn station_count(&self) -> usize {
        self.distances.size()
    }
}

impl Router for ShortestPaths {
    fn station_count(&self) -> usize {
        self.distances.size()
    }

    fn distance(&self, from: StationId, to: StationId) -> Cost {
        ShortestPaths::distance(self, from, to)
    }

    fn extend_route(&self, route: &mut Route, to: StationId) -> NetworkResult<()> {
        let n = self.station_count();
        let from = route.last();
        for s in [from, to] {
            if s.index() >= n {
                return Err(NetworkError::StationNotFound(s));
            }
        }
        extend_with_predecessors(&self.predecessors, self.distance(from, to), route, to)
    }
}

// ── Floyd-Warshall ────────────────────────────────────────────────────────────

fn floyd_warshall(
    mut dist: Matrix<Cost>,
    mut pred: Matrix<StationId>,
) -> (Matrix<Cost>, Matrix<StationId>) {
    let n = dist.size();
    let mut relaxations: u64 = 0;

    for k in 0..n {
        for v in 0..n {
            let via_k = dist.get(v, k);
            if !via_k.is_finite() {
                continue;
            }
            for u in 0..n {
                let Some(through) = via_k.checked_add(dist.get(k, u)) else {
                    continue;
                };
                if through < dist.get(v, u) {
                    dist.set(v, u, through);
                    pred.set(v, u, pred.get(k, u));
                    relaxations += 1;
                }
            }
        }
    }

    tracing::debug!(stations = n, relaxations, "all-pairs shortest paths solved");
    (dist, pred)
}
