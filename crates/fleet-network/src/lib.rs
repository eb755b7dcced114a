//! `fleet-network`: station graph, all-pairs shortest paths, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`matrix`]  | `Matrix<T>`: dense row-major n×n storage                   |
//! | [`network`] | `Network`, `NetworkBuilder`, `Edge`                         |
//! | [`paths`]   | `ShortestPaths`: Floyd-Warshall distances + predecessors   |
//! | [`router`]  | `Router` trait, `Route`                                     |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Data flow
//!
//! ```text
//! NetworkBuilder ──build──▶ Network ──ShortestPaths::solve──▶ ShortestPaths (impl Router)
//! ```
//!
//! Both `Network` and `ShortestPaths` are immutable once built and are shared
//! read-only by the dispatch and itinerary crates.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the station-pair → edge lookup.                 |
//! | `serde`   | Derives `Serialize`/`Deserialize` on id and cost types.    |

pub mod error;
pub mod matrix;
pub mod network;
pub mod paths;
pub mod router;


pub use error::{NetworkError, NetworkResult};
pub use matrix::Matrix;
pub use network::{Edge, Network, NetworkBuilder};
pub use paths::ShortestPaths;
pub use router::{Route, Router};
