//! Error types for U-Packing.

use thiserror::Error;

/// Result type alias for U-Packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during packing operations.
///
/// Only batch-level problems surface as errors. An item that cannot be placed
/// is recorded in the [`SolveResult`](crate::SolveResult) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item dimensions.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid container or catalog entry.
    #[error("Invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
