//! CLI error types.

use thiserror::Error;

use swaptree_core::CoreError;
use swaptree_pricing::PricingError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// File extension is neither `.toml` nor `.json`.
    #[error("Unsupported file format: {0}. Use a .toml or .json file.")]
    UnsupportedFormat(String),

    /// File contents could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pricing failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Market data or schedule error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
