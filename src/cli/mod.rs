//! Command-line parsing for the OPEC+ production monitor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetch/analysis code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "crude", version, about = "OPEC+ crude production monitor (EIA STEO)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one country's series and print the change table, narrative, and plots.
    Report(ReportArgs),
    /// Fetch every tracked country and print one narrative line each.
    ///
    /// Fetches run in parallel; a failure for one country is reported inline
    /// and never aborts the others.
    Batch(BatchArgs),
    /// List the tracked countries and their STEO series ids.
    Countries,
}

/// Options for single-country reports.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Country to report on (see `crude countries`).
    #[arg(short = 'c', long)]
    pub country: String,

    /// First month of the fetch window (YYYY-MM).
    #[arg(long, default_value = "2018-01")]
    pub start: String,

    /// Last month of the fetch window (YYYY-MM); defaults to the current month.
    #[arg(long)]
    pub end: Option<String>,

    /// Rows of the change table to print (most recent months).
    #[arg(long, default_value_t = 12)]
    pub months: usize,

    /// Render ASCII plots in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export per-month change records to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the analysis summary to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

/// Options for the all-countries batch run.
#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// First month of the fetch window (YYYY-MM).
    #[arg(long, default_value = "2018-01")]
    pub start: String,

    /// Last month of the fetch window (YYYY-MM); defaults to the current month.
    #[arg(long)]
    pub end: Option<String>,

    /// Export all successful summaries to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}
