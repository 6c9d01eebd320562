//! Init command implementation.
//!
//! Writes a sample swaption file to start from.

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::config::SwaptionFile;
use crate::error::CliError;
use crate::output::print_success;

/// Arguments for the init command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to write; the extension picks TOML or JSON. Prints TOML to
    /// stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the init command.
pub fn execute(args: InitArgs, _format: OutputFormat) -> Result<()> {
    let sample = SwaptionFile::sample()?;

    let Some(path) = args.output else {
        print!("{}", to_toml(&sample)?);
        return Ok(());
    };

    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::to_string_pretty(&sample)?,
        Some("toml") => to_toml(&sample)?,
        _ => return Err(CliError::UnsupportedFormat(path.display().to_string()).into()),
    };
    std::fs::write(&path, content)?;
    print_success(&format!("Wrote sample swaption to {}", path.display()));
    Ok(())
}

fn to_toml(sample: &SwaptionFile) -> Result<String, CliError> {
    toml::to_string_pretty(sample).map_err(|e| CliError::Serialization(e.to_string()))
}
