//! Check command implementation.
//!
//! Validates a swaption file and shows the exercise schedule as lattice
//! times, without pricing.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use swaptree_core::daycounts::DayCount;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::load_valid;
use crate::output::{print_header, print_json, print_output, print_success, print_warning};

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Swaption file (.toml or .json)
    pub file: PathBuf,
}

/// One exercise date of the schedule.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "Exercise Date")]
    pub date: String,
    #[tabled(rename = "Time")]
    pub time: f64,
    #[tabled(rename = "Fixed Coupons Left")]
    pub fixed_coupons_left: usize,
    #[tabled(rename = "Priced")]
    pub priced: bool,
}

/// Execute the check command.
pub fn execute(args: CheckArgs, format: OutputFormat) -> Result<()> {
    let file = load_valid(&args.file)?;
    let swaption = file.swaption_arguments()?;
    let day_count = file.day_count.to_day_count();

    let rows: Vec<ScheduleRow> = swaption
        .exercise
        .dates()
        .iter()
        .map(|date| {
            let time = day_count.year_fraction_f64(file.reference_date, *date);
            ScheduleRow {
                date: date.to_string(),
                time: (time * 1e4).round() / 1e4,
                fixed_coupons_left: swaption
                    .swap
                    .fixed_reset_dates
                    .iter()
                    .filter(|reset| *reset >= date)
                    .count(),
                priced: time >= 0.0,
            }
        })
        .collect();
    let past = rows.iter().filter(|r| !r.priced).count();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Table | OutputFormat::Minimal => {
            print_success(&format!("{} is valid", args.file.display()));
            if past > 0 {
                print_warning(&format!(
                    "{past} exercise date(s) before {} are ignored",
                    file.reference_date
                ));
            }
            if format == OutputFormat::Table {
                print_header("Exercise Schedule");
                print_output(&rows, format)?;
            }
        }
    }

    Ok(())
}
