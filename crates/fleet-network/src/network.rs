//! Station graph representation and builder.
//!
//! # Data layout
//!
//! The network is small and dense-queried, so it is stored as an n×n weight
//! matrix rather than an adjacency list.  Building the network also seeds the
//! predecessor matrix consumed by [`ShortestPaths`](crate::ShortestPaths):
//!
//! ```text
//! weights[i][i] = 0          predecessors[i][i] = i
//! weights[a][b] = d          predecessors[a][b] = a      (every edge a–b,
//! weights[b][a] = d          predecessors[b][a] = b       both directions)
//! weights[i][j] = INFINITE   predecessors[i][j] = INVALID (everything else)
//! ```
//!
//! # Duplicate edges
//!
//! A second edge between the same pair of stations overwrites the first
//! (weight and display name), regardless of which one is shorter.  The
//! overwritten pairs are kept in [`Network::overwritten_pairs`] and logged at
//! `warn` level so callers can decide whether to reject such input.

use std::collections::HashMap;

use fleet_core::{Cost, EdgeId, StationId};

use crate::matrix::Matrix;
use crate::{NetworkError, NetworkResult};

#[cfg(feature = "fx-hash")]
type PairMap<V> = rustc_hash::FxHashMap<(StationId, StationId), V>;
#[cfg(not(feature = "fx-hash"))]
type PairMap<V> = HashMap<(StationId, StationId), V>;

// ── Edge ──────────────────────────────────────────────────────────────────────

/// An undirected, labelled connection between two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Display label.  Not required to be unique.
    pub name:     String,
    pub a:        StationId,
    pub b:        StationId,
    pub distance: Cost,
}

impl Edge {
    /// The endpoint opposite `from`, or `None` if `from` is not an endpoint.
    pub fn other(&self, from: StationId) -> Option<StationId> {
        if from == self.a {
            Some(self.b)
        } else if from == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

/// Immutable station graph plus the matrices that seed the shortest-path
/// solver.
///
/// Do not construct directly; use [`NetworkBuilder`].
#[derive(Debug)]
pub struct Network {
    /// Display name of each station.  Indexed by `StationId`.
    pub station_names: Vec<String>,

    /// Every edge in insertion order, including ones later overwritten.
    /// Indexed by `EdgeId`.
    pub edges: Vec<Edge>,

    /// Direct edge weights (`INFINITE` where no edge exists).
    pub weights: Matrix<Cost>,

    /// Predecessor seed: `a` for a direct edge `a → b`, `i` on the diagonal.
    pub predecessors: Matrix<StationId>,

    station_index: HashMap<String, StationId>,
    edge_index:    PairMap<EdgeId>,
    overwritten:   Vec<(StationId, StationId)>,
}

impl Network {
    /// A network with no stations.
    pub fn empty() -> Self {
        NetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.station_names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.station_names.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Resolve a station by display name.
    pub fn station_id(&self, name: &str) -> NetworkResult<StationId> {
        self.station_index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation(name.to_owned()))
    }

    /// Display name of `station`, or `None` if out of range.
    pub fn station_name(&self, station: StationId) -> Option<&str> {
        self.station_names.get(station.index()).map(String::as_str)
    }

    /// `Ok(())` if `station` belongs to this network.
    pub fn check_station(&self, station: StationId) -> NetworkResult<()> {
        if station.index() < self.station_count() {
            Ok(())
        } else {
            Err(NetworkError::StationNotFound(station))
        }
    }

    /// Id of the edge currently connecting `from` and `to` (either direction).
    #[inline]
    pub fn edge_id_between(&self, from: StationId, to: StationId) -> Option<EdgeId> {
        self.edge_index.get(&(from, to)).copied()
    }

    /// The edge currently connecting `from` and `to` (either direction).
    #[inline]
    pub fn edge_between(&self, from: StationId, to: StationId) -> Option<&Edge> {
        self.edge_id_between(from, to).map(|id| &self.edges[id.index()])
    }

    /// Edge by id, or `None` if out of range.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Station pairs `(a, b)` whose first edge was overwritten by a later one,
    /// in the order the overwrites happened.
    pub fn overwritten_pairs(&self) -> &[(StationId, StationId)] {
        &self.overwritten
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// Stations must be added before the edges that reference them.  Edges are
/// always undirected.
///
/// # Example
///
/// ```
/// use fleet_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_station("A").unwrap();
/// let c = b.add_station("C").unwrap();
/// b.add_edge("E1", a, c, 30).unwrap();
/// let net = b.build();
/// assert_eq!(net.station_count(), 2);
/// assert_eq!(net.edge_between(c, a).unwrap().name, "E1");
/// ```
pub struct NetworkBuilder {
    names:         Vec<String>,
    station_index: HashMap<String, StationId>,
    edges:         Vec<Edge>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self {
            names:         Vec::new(),
            station_index: HashMap::new(),
            edges:         Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of stations and edges.
    pub fn with_capacity(stations: usize, edges: usize) -> Self {
        Self {
            names:         Vec::with_capacity(stations),
            station_index: HashMap::with_capacity(stations),
            edges:         Vec::with_capacity(edges),
        }
    }

    /// Add a station and return its `StationId` (sequential from 0).
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateStation`] if the name is already taken.
    pub fn add_station(&mut self, name: impl Into<String>) -> NetworkResult<StationId> {
        let name = name.into();
        if self.station_index.contains_key(&name) {
            return Err(NetworkError::DuplicateStation(name));
        }
        let id = StationId::from_index(self.names.len())?;
        self.station_index.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Resolve a station added earlier by name.
    pub fn station_id(&self, name: &str) -> NetworkResult<StationId> {
        self.station_index
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation(name.to_owned()))
    }

    /// Add an undirected edge between `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::StationNotFound`] if either endpoint was never added.
    /// - [`NetworkError::SelfLoop`] if `a == b`.
    /// - [`NetworkError::DistanceOutOfRange`] if `distance` collides with the
    ///   infinite sentinel.
    pub fn add_edge(
        &mut self,
        name:     impl Into<String>,
        a:        StationId,
        b:        StationId,
        distance: u64,
    ) -> NetworkResult<EdgeId> {
        let name = name.into();
        for s in [a, b] {
            if s.index() >= self.names.len() {
                return Err(NetworkError::StationNotFound(s));
            }
        }
        if a == b {
            return Err(NetworkError::SelfLoop { name, station: a });
        }
        let Some(distance) = Cost::new(distance) else {
            return Err(NetworkError::DistanceOutOfRange { name, distance });
        };

        let id = EdgeId::from_index(self.edges.len())?;
        self.edges.push(Edge { name, a, b, distance });
        Ok(id)
    }

    /// Convenience: [`add_edge`](Self::add_edge) with endpoints given by name.
    pub fn add_edge_between(
        &mut self,
        name:     impl Into<String>,
        a:        &str,
        b:        &str,
        distance: u64,
    ) -> NetworkResult<EdgeId> {
        let a = self.station_id(a)?;
        let b = self.station_id(b)?;
        self.add_edge(name, a, b, distance)
    }

    pub fn station_count(&self) -> usize { self.names.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Consume the builder and produce a [`Network`].
    ///
    /// Edges are applied in insertion order, so for duplicate pairs the last
    /// edge wins.  Time complexity: O(N²) for the matrices plus O(E).
    pub fn build(self) -> Network {
        let n = self.names.len();

        let mut weights      = Matrix::new(n, Cost::INFINITE);
        let mut predecessors = Matrix::new(n, StationId::INVALID);
        for i in 0..n {
            weights.set(i, i, Cost::ZERO);
            predecessors.set(i, i, StationId(i as u32));
        }

        let mut edge_index: PairMap<EdgeId> = PairMap::default();
        let mut overwritten = Vec::new();

        for (i, e) in self.edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            let (a, b) = (e.a.index(), e.b.index());

            weights.set(a, b, e.distance);
            weights.set(b, a, e.distance);
            predecessors.set(a, b, e.a);
            predecessors.set(b, a, e.b);

            if let Some(previous) = edge_index.insert((e.a, e.b), id) {
                tracing::warn!(
                    edge = %e.name,
                    replaced = %self.edges[previous.index()].name,
                    a = %self.names[a],
                    b = %self.names[b],
                    "duplicate edge overwrites earlier one",
                );
                overwritten.push((e.a, e.b));
            }
            edge_index.insert((e.b, e.a), id);
        }

        tracing::debug!(stations = n, edges = self.edges.len(), "network built");

        Network {
            station_names: self.names,
            edges: self.edges,
            weights,
            predecessors,
            station_index: self.station_index,
            edge_index,
            overwritten,
        }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
