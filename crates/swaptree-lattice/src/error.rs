//! Error types for lattice operations.

use thiserror::Error;

/// A specialized Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors raised while building or walking a lattice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// A time is not one of the grid times.
    #[error("Time {time} is not on the time grid (closest grid time {closest})")]
    TimeNotOnGrid {
        /// The requested time.
        time: f64,
        /// The closest grid time.
        closest: f64,
    },

    /// The grid could not be constructed.
    #[error("Invalid time grid: {reason}")]
    InvalidGrid {
        /// Description of what's invalid.
        reason: String,
    },

    /// Tree data are inconsistent.
    #[error("Invalid tree: {reason}")]
    InvalidTree {
        /// Description of what's invalid.
        reason: String,
    },

    /// Rollback requested towards a later time.
    #[error("Cannot roll back from {from} to later time {to}")]
    InvalidRollback {
        /// Current asset time.
        from: f64,
        /// Requested target time.
        to: f64,
    },

    /// Asset used before `initialize`.
    #[error("Discretized asset has not been initialized on a lattice")]
    NotInitialized,

    /// Value array does not match the slice it is rolled back from.
    #[error("Value array has {actual} nodes but slice {slice} has {expected}")]
    SizeMismatch {
        /// Slice index.
        slice: usize,
        /// Node count of the slice.
        expected: usize,
        /// Length of the value array.
        actual: usize,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] swaptree_core::CoreError),
}

impl LatticeError {
    /// Creates an invalid grid error.
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    /// Creates an invalid tree error.
    #[must_use]
    pub fn invalid_tree(reason: impl Into<String>) -> Self {
        Self::InvalidTree {
            reason: reason.into(),
        }
    }
}
