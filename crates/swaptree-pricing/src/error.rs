//! Error types for swaption pricing.

use thiserror::Error;

use swaptree_core::CoreError;
use swaptree_lattice::LatticeError;

use crate::config::ValidationError;

/// A specialized Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors raised while pricing a swaption on a lattice.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// The exercise style cannot be handled by the lattice swaption.
    #[error("Cannot perform {exercise} exercise on a lattice swaption")]
    UnsupportedExercise {
        /// Name of the exercise style.
        exercise: String,
    },

    /// The underlying is not of the requested kind.
    #[error("Underlying must be a {expected}, found a {found}")]
    UnderlyingMismatch {
        /// Requested underlying kind.
        expected: &'static str,
        /// Actual underlying kind.
        found: &'static str,
    },

    /// Swap or swaption arguments are inconsistent.
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Description of what's invalid.
        reason: String,
    },

    /// A floating coupon fixed before the reference date was not supplied.
    #[error("Current floating coupon not given (coupon {index})")]
    MissingFloatingCoupon {
        /// Index of the coupon on the floating leg.
        index: usize,
    },

    /// Option and underlying sit on different lattices.
    #[error("Option and underlying were initialized on different lattices")]
    LatticeMismatch,

    /// More exercise records than exercise dates.
    #[error("Exercise dates definition error: {dates} dates but {records} exercise records")]
    ExerciseCountMismatch {
        /// Number of exercise dates.
        dates: usize,
        /// Number of exercise records.
        records: usize,
    },

    /// The final payment of the underlying could not be located.
    #[error("Cannot locate the final payment of the underlying: {reason}")]
    MissingFinalPayment {
        /// Description of the failure.
        reason: String,
    },

    /// Exercise probabilities requested before the swaption was priced.
    #[error("No exercise records: the swaption must be priced before querying exercise probabilities")]
    NotPriced,

    /// Exercise date index out of range.
    #[error("Exercise date index {index} out of range ({count} priced exercise dates)")]
    ExerciseIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of priced exercise dates.
        count: usize,
    },

    /// Engine configuration failed validation.
    #[error("Invalid configuration: {}", join_errors(.errors))]
    InvalidConfig {
        /// Every failed check.
        errors: Vec<ValidationError>,
    },

    /// Lattice error.
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl PricingError {
    /// Creates an invalid arguments error.
    #[must_use]
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// Creates a missing final payment error.
    #[must_use]
    pub fn missing_final_payment(reason: impl Into<String>) -> Self {
        Self::MissingFinalPayment {
            reason: reason.into(),
        }
    }
}
