//! Export analysis results to CSV/JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; they only read the core's plain values.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::EntityReport;
use crate::domain::AnalysisSummary;
use crate::error::AppError;

/// Write one entity's change records to a CSV file.
///
/// Absent MoM/YoY values are written as empty fields, never as numbers.
pub fn write_changes_csv(path: &Path, report: &EntityReport) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "entity,series_id,period,value_kbd,mom_pct,yoy_pct")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for record in &report.changes {
        writeln!(
            file,
            "{},{},{},{:.4},{},{}",
            report.entity_name,
            report.series_id,
            record.period,
            record.value,
            record.mom.map(|v| format!("{v:.4}")).unwrap_or_default(),
            record.yoy.map(|v| format!("{v:.4}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write one or more analysis summaries to a JSON file.
pub fn write_summaries_json(path: &Path, summaries: &[AnalysisSummary]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, summaries)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, summarize};
    use crate::domain::{Observation, Period, Series};

    fn sample_report() -> EntityReport {
        let series = Series::new(
            "COPR_KZ",
            vec![
                Observation { period: Period::new(2023, 1).unwrap(), value: 1900.0 },
                Observation { period: Period::new(2023, 2).unwrap(), value: 1850.0 },
                Observation { period: Period::new(2024, 1).unwrap(), value: 2000.0 },
            ],
        );
        let changes = analyze(&series);
        let summary = summarize(&changes, "Kazakhstan").unwrap();
        EntityReport {
            entity_name: "Kazakhstan".to_string(),
            series_id: "COPR_KZ".to_string(),
            series,
            changes,
            summary,
        }
    }

    #[test]
    fn changes_csv_round_trips_through_the_filesystem() {
        let report = sample_report();
        let dir = std::env::temp_dir();
        let path = dir.join("crude_pulse_changes_test.csv");

        write_changes_csv(&path, &report).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "entity,series_id,period,value_kbd,mom_pct,yoy_pct");
        assert_eq!(lines.len(), 4);
        // First record: no priors, both changes empty.
        assert_eq!(lines[1], "Kazakhstan,COPR_KZ,2023-01,1900.0000,,");
        // Latest record: both present.
        assert!(lines[3].starts_with("Kazakhstan,COPR_KZ,2024-01,2000.0000,8.1081,5.2632"));
    }

    #[test]
    fn summaries_json_is_readable_back() {
        let report = sample_report();
        let dir = std::env::temp_dir();
        let path = dir.join("crude_pulse_summary_test.json");

        write_summaries_json(&path, std::slice::from_ref(&report.summary)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let back: Vec<AnalysisSummary> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].entity_name, "Kazakhstan");
        assert_eq!(back[0].period_label, "Jan 2024");
        assert!(back[0].narrative.contains("2,000 kb/d"));
    }
}
