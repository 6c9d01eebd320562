//! Price command implementation.
//!
//! Prices a swaption file and reports the exercise probability and swap
//! boundary of each exercise date.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use swaptree_pricing::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::load_valid;
use crate::output::{
    format_probability, format_rate, print_csv, print_header, print_json, print_output, KeyValue,
};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Swaption file (.toml or .json)
    pub file: PathBuf,

    /// Number of time steps, overriding the file
    #[arg(long)]
    pub steps: Option<usize>,

    /// Underlying exercised into, overriding the file
    #[arg(long, value_enum)]
    pub underlying: Option<UnderlyingArg>,
}

/// Underlying choices on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnderlyingArg {
    /// One swap per exercise date
    CoterminalStrip,
    /// The full swap
    SingleSwap,
}

impl From<UnderlyingArg> for UnderlyingKind {
    fn from(arg: UnderlyingArg) -> Self {
        match arg {
            UnderlyingArg::CoterminalStrip => UnderlyingKind::CoterminalStrip,
            UnderlyingArg::SingleSwap => UnderlyingKind::SingleSwap,
        }
    }
}

/// One exercise date, formatted for display.
#[derive(Debug, Serialize, Tabled)]
pub struct ExerciseRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Time")]
    pub time: String,
    #[tabled(rename = "Exercised")]
    pub exercised: String,
    #[tabled(rename = "Boundary Node")]
    pub boundary_node: String,
    #[tabled(rename = "Exercise Probability")]
    pub probability: String,
    #[tabled(rename = "Boundary Rate")]
    pub boundary_rate: String,
}

impl From<&ExerciseReport> for ExerciseRow {
    fn from(report: &ExerciseReport) -> Self {
        Self {
            date: report.date.to_string(),
            time: format!("{:.4}", report.time),
            exercised: if report.exercised { "yes" } else { "no" }.to_string(),
            boundary_node: report
                .boundary_node
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
            probability: format_probability(report.probability),
            boundary_rate: format_rate(report.boundary_rate),
        }
    }
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat) -> Result<()> {
    let mut file = load_valid(&args.file)?;
    if let Some(steps) = args.steps {
        file.engine.time_steps = steps;
    }
    if let Some(underlying) = args.underlying {
        file.engine.underlying = underlying.into();
    }

    let swaption = file.swaption_arguments()?;
    let engine = file.engine()?;
    let day_count = file.day_count.to_day_count();
    let results = engine.calculate(&swaption, file.reference_date, day_count.as_ref())?;

    match format {
        OutputFormat::Table => {
            let summary = vec![
                KeyValue::new(
                    "Swaption",
                    format!("{} {}", swaption.exercise.exercise_type(), file.swap.swap_type),
                ),
                KeyValue::new("Swap", format!("{} to {}", file.swap.start, file.swap.maturity)),
                KeyValue::new("Nominal", format!("{:.2}", file.swap.nominal)),
                KeyValue::new("Fixed Rate", format_rate(file.swap.fixed_rate)),
                KeyValue::new("Reference Date", file.reference_date.to_string()),
                KeyValue::new(
                    "Model",
                    format!(
                        "Hull-White (a = {}, sigma = {})",
                        file.model.mean_reversion, file.model.volatility
                    ),
                ),
                KeyValue::new("Underlying", file.engine.underlying.to_string()),
                KeyValue::new("Time Steps", file.engine.time_steps.to_string()),
                KeyValue::new("NPV", format!("{:.6}", results.npv)),
            ];
            print_header("Swaption Pricing Results");
            print_output(&summary, format)?;

            let rows: Vec<ExerciseRow> = results.exercises.iter().map(ExerciseRow::from).collect();
            print_header(EXERCISE_PROBABILITY_AND_SWAP_BOUNDARY);
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json(&results)?,
        OutputFormat::Csv => print_csv(&results.exercises)?,
        OutputFormat::Minimal => println!("{:.6}", results.npv),
    }

    Ok(())
}
