//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `FleetError` as one
//! variant where they need it.

use thiserror::Error;

/// The base error type for `fleet-core`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} index {index} does not fit in a 32-bit id")]
    IdOverflow { what: &'static str, index: usize },
}

/// Shorthand result type for `fleet-core`.
pub type FleetResult<T> = Result<T, FleetError>;
