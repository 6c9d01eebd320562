//! Swaptree CLI - prices Bermudan swaptions from description files.
//!
//! # Usage
//!
//! ```bash
//! # Write a sample file
//! swaptree init --output swaption.toml
//!
//! # Price it
//! swaptree price swaption.toml
//!
//! # Exercise probabilities as CSV, single-swap underlying, finer tree
//! swaptree price swaption.toml --format csv --underlying single-swap --steps 400
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library crates log through `log`; the subscriber picks those up too.
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,swaptree=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,swaptree=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format)?,
        Commands::Check(args) => commands::check::execute(args, format)?,
        Commands::Init(args) => commands::init::execute(args, format)?,
    }

    Ok(())
}
