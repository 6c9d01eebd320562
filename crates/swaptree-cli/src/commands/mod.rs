//! CLI command implementations.

pub mod check;
pub mod init;
pub mod price;

pub use check::CheckArgs;
pub use init::InitArgs;
pub use price::PriceArgs;

use std::path::Path;

use swaptree_pricing::Validate;

use crate::config::SwaptionFile;
use crate::error::{CliError, CliResult};

/// Loads a swaption file and rejects it if any check fails.
pub fn load_valid(path: &Path) -> CliResult<SwaptionFile> {
    let file = SwaptionFile::load(path)?;
    let errors = file.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(CliError::Config(details.join("; ")));
    }
    tracing::debug!("loaded {}", path.display());
    Ok(file)
}
