//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the EIA client from environment config
//! - runs the fetch/analysis pipeline
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{BatchArgs, Command, ReportArgs};
use crate::data::EiaClient;
use crate::domain::{EntityCatalog, FetchWindow, Period};
use crate::error::AppError;
use crate::plot::ChangeKind;

pub mod pipeline;

/// Entry point for the `crude` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `crude` to behave like `crude batch`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Report(args) => handle_report(args),
        Command::Batch(args) => handle_batch(args),
        Command::Countries => handle_countries(),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let window = window_from(&args.start, args.end.as_deref())?;
    let client = EiaClient::from_env()?;
    let catalog = EntityCatalog::opec_plus();

    let report = pipeline::run_entity(&client, &catalog, &args.country, &window)?;

    println!(
        "{}",
        crate::report::format_entity_report(&report, &window, args.months)
    );

    if args.plot && !args.no_plot {
        println!(
            "{}",
            crate::plot::render_series_plot(&report.series, args.width, args.height)
        );
        println!(
            "{}",
            crate::plot::render_change_plot(&report.changes, ChangeKind::Mom, args.width, args.height)
        );
        println!(
            "{}",
            crate::plot::render_change_plot(&report.changes, ChangeKind::Yoy, args.width, args.height)
        );
    }

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_changes_csv(path, &report)?;
    }
    if let Some(path) = &args.export_summary {
        crate::io::export::write_summaries_json(path, std::slice::from_ref(&report.summary))?;
    }

    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let window = window_from(&args.start, args.end.as_deref())?;
    let client = EiaClient::from_env()?;
    let catalog = EntityCatalog::opec_plus();

    let results = pipeline::run_batch(&client, &catalog, &window);
    print!("{}", crate::report::format_batch_summary(&results));

    if let Some(path) = &args.export_summary {
        let summaries: Vec<_> = results
            .iter()
            .filter_map(|(_, r)| r.as_ref().ok())
            .map(|report| report.summary.clone())
            .collect();
        crate::io::export::write_summaries_json(path, &summaries)?;
    }

    Ok(())
}

fn handle_countries() -> Result<(), AppError> {
    let catalog = EntityCatalog::opec_plus();
    print!("{}", crate::report::format_catalog(&catalog));
    Ok(())
}

/// Build the fetch window from CLI strings; `end` falls back to the current
/// calendar month.
pub fn window_from(start: &str, end: Option<&str>) -> Result<FetchWindow, AppError> {
    let start = Period::parse(start)
        .ok_or_else(|| AppError::new(2, format!("Invalid start period '{start}' (want YYYY-MM).")))?;
    let end = match end {
        Some(s) => Period::parse(s)
            .ok_or_else(|| AppError::new(2, format!("Invalid end period '{s}' (want YYYY-MM).")))?,
        None => Period::current(),
    };
    if end < start {
        return Err(AppError::new(2, "End period precedes start period."));
    }
    Ok(FetchWindow { start, end })
}

/// Rewrite argv so `crude` defaults to `crude batch`.
///
/// Rules:
/// - `crude`                     -> `crude batch`
/// - `crude --start 2020-01`     -> `crude batch --start 2020-01`
/// - `crude --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("batch".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "batch" | "countries");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "batch flags".
    if arg1.starts_with('-') {
        argv.insert(1, "batch".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
