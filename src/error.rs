//! Error type shared by the crate.

use thiserror::Error;

/// Errors raised at the caller-facing boundary.
///
/// The search engine itself has no recoverable failure modes: once input
/// passes validation, the only terminal outcome is convergence.
#[derive(Debug, Error)]
pub enum TspError {
    /// Reading an instance or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No cities were supplied.
    #[error("instance has no cities")]
    EmptyInstance,

    /// A city has a NaN or infinite coordinate.
    #[error("city {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// Index of the offending city.
        index: usize,
        /// X-coordinate as supplied.
        x: f64,
        /// Y-coordinate as supplied.
        y: f64,
    },

    /// A route is not a permutation of `0..n`.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A search configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An argument is out of its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
