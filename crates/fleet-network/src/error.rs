//! Network-subsystem error type.

use thiserror::Error;

use fleet_core::{FleetError, StationId};

/// Errors produced by `fleet-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("unknown station {0:?}")]
    UnknownStation(String),

    #[error("station name {0:?} is defined more than once")]
    DuplicateStation(String),

    #[error("station {0} not found in network")]
    StationNotFound(StationId),

    #[error("edge {name:?} connects {station} to itself")]
    SelfLoop { name: String, station: StationId },

    #[error("edge {name:?} has out-of-range distance {distance}")]
    DistanceOutOfRange { name: String, distance: u64 },

    #[error("no route from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },

    #[error("predecessor chain from {from} to {to} does not reach the source")]
    CorruptPredecessors { from: StationId, to: StationId },

    #[error(transparent)]
    Core(#[from] FleetError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
