use fleet_core::StationId;
use fleet_network::NetworkError;
use thiserror::Error;

/// Why a package could not be given to any vehicle.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("package {package:?} weighs {weight} but the largest capacity is {max_capacity:?}")]
    InsufficientCapacity {
        package:      String,
        weight:       u64,
        /// `None` when the fleet is empty.
        max_capacity: Option<u64>,
    },

    #[error("package {package:?}: no capable vehicle can reach pickup {pickup}")]
    PickupUnreachable { package: String, pickup: StationId },

    #[error("package {package:?}: no route from {from} to {to}")]
    Undeliverable {
        package: String,
        from:    StationId,
        to:      StationId,
    },

    #[error("package {package:?}: {source}")]
    Network {
        package: String,
        #[source]
        source:  NetworkError,
    },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
