//! Lattice engine configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PricingError, PricingResult};

/// A single failed configuration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validating configurations.
pub trait Validate {
    /// Returns every failed check, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> PricingResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::InvalidConfig { errors })
        }
    }
}

/// Which discretized asset the swaption exercises into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnderlyingKind {
    /// One swap per exercise date, all ending at the swap maturity.
    #[default]
    CoterminalStrip,
    /// The full swap; coupons fixed before an exercise date drop out by themselves.
    SingleSwap,
}

impl fmt::Display for UnderlyingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnderlyingKind::CoterminalStrip => write!(f, "coterminal swap strip"),
            UnderlyingKind::SingleSwap => write!(f, "single swap"),
        }
    }
}

/// Settings of the tree swaption engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEngineConfig {
    /// Target number of time steps between 0 and the last payment.
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,

    /// Days within which swap dates are moved onto a nearby exercise date.
    #[serde(default = "default_collapse_window_days")]
    pub collapse_window_days: i64,

    /// Underlying the swaption exercises into.
    #[serde(default)]
    pub underlying: UnderlyingKind,
}

fn default_time_steps() -> usize {
    100
}

fn default_collapse_window_days() -> i64 {
    7
}

impl Default for TreeEngineConfig {
    fn default() -> Self {
        Self {
            time_steps: default_time_steps(),
            collapse_window_days: default_collapse_window_days(),
            underlying: UnderlyingKind::default(),
        }
    }
}

impl TreeEngineConfig {
    /// Sets the number of time steps.
    #[must_use]
    pub fn with_time_steps(mut self, steps: usize) -> Self {
        self.time_steps = steps;
        self
    }

    /// Sets the underlying kind.
    #[must_use]
    pub fn with_underlying(mut self, underlying: UnderlyingKind) -> Self {
        self.underlying = underlying;
        self
    }
}

impl Validate for TreeEngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.time_steps == 0 {
            errors.push(ValidationError::new("time_steps", "must be at least 1"));
        }
        if self.time_steps > 100_000 {
            errors.push(ValidationError::new("time_steps", "must not exceed 100000"));
        }
        if self.collapse_window_days < 0 {
            errors.push(ValidationError::new("collapse_window_days", "cannot be negative"));
        }
        errors
    }
}
