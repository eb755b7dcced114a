//! Error types for fleet-io.

use fleet_network::NetworkError;
use thiserror::Error;

/// Errors raised while reading or resolving a scenario.
///
/// Line numbers are 1-based and count blank lines.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: input ended while expecting {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: invalid {what} {value:?}")]
    InvalidCount { line: usize, what: &'static str, value: String },

    #[error("line {line}: {what} record needs {expected} fields, found {found}")]
    FieldCount { line: usize, what: &'static str, expected: usize, found: usize },

    #[error("line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, InputError>`.
pub type InputResult<T> = Result<T, InputError>;

/// Errors that can occur when writing a schedule.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
