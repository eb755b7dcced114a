use fleet_core::{FleetError, StationId, VehicleId};
use fleet_dispatch::DispatchError;
use fleet_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItineraryError {
    #[error("planner configuration error: {0}")]
    Config(#[from] FleetError),

    #[error("routing failed: {0}")]
    Network(#[from] NetworkError),

    #[error("assignment failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("assignment strategy returned an invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("route hop {from} → {to} has no direct edge")]
    MissingEdge { from: StationId, to: StationId },

    #[error("clock of vehicle {0} overflowed")]
    ClockOverflow(VehicleId),

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type ItineraryResult<T> = Result<T, ItineraryError>;
