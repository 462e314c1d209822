//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the fetch/analysis code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::analysis::fmt_thousands;
use crate::app::pipeline::EntityReport;
use crate::domain::{ChangeRecord, FetchWindow};
use crate::error::AppError;

/// Format the full single-entity report: header, change table, narrative.
pub fn format_entity_report(report: &EntityReport, window: &FetchWindow, months: usize) -> String {
    let mut out = String::new();

    out.push_str("=== crude - OPEC+ Production Monitor (EIA STEO) ===\n");
    out.push_str(&format!(
        "Country: {} ({})\n",
        report.entity_name, report.series_id
    ));
    out.push_str(&format!("Window: {}..{}\n", window.start, window.end));
    out.push_str(&format!("Observations: {}\n", report.series.len()));
    out.push('\n');

    out.push_str(&format_change_table(&report.changes, months));
    out.push('\n');
    out.push_str(&report.summary.narrative);
    out.push('\n');

    out
}

/// Format the last `months` change records as a table.
pub fn format_change_table(changes: &[ChangeRecord], months: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<10} {:>12} {:>9} {:>9}\n",
        "period", "kb/d", "MoM", "YoY"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<12} {:-<9} {:-<9}\n",
        "", "", "", ""
    ));

    let skip = changes.len().saturating_sub(months.max(1));
    for record in &changes[skip..] {
        out.push_str(&format!(
            "{:<10} {:>12} {:>9} {:>9}\n",
            record.period.to_string(),
            fmt_thousands(record.value),
            fmt_pct(record.mom),
            fmt_pct(record.yoy),
        ));
    }

    out
}

/// One line per entity; failures are reported inline and never hide the
/// entities that did succeed.
pub fn format_batch_summary(results: &[(String, Result<EntityReport, AppError>)]) -> String {
    let mut out = String::new();

    out.push_str("=== crude - OPEC+ Production Monitor (EIA STEO) ===\n\n");
    for (name, result) in results {
        match result {
            Ok(report) => {
                out.push_str(&report.summary.narrative);
                out.push('\n');
            }
            Err(err) => {
                out.push_str(&format!("{name}: fetch failed ({err})\n"));
            }
        }
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    out.push_str(&format!(
        "\n{} countries reported, {} failed.\n",
        results.len() - failed,
        failed
    ));

    out
}

/// Format the country catalog listing.
pub fn format_catalog(catalog: &crate::domain::EntityCatalog) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {}\n", "country", "series id"));
    out.push_str(&format!("{:-<16} {:-<9}\n", "", ""));
    for (name, id) in catalog.entries() {
        out.push_str(&format!("{name:<16} {id}\n"));
    }
    out
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{pct:+.1}%"),
        None => "n/a".to_string(),
    }
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
    fn change_table_shows_last_n_months() {
        let report = sample_report();
        let table = format_change_table(&report.changes, 2);
        assert!(!table.contains("2023-01"));
        assert!(table.contains("2023-02"));
        assert!(table.contains("2024-01"));
        assert!(table.contains("+10.0%"));
        assert!(table.contains("n/a"));
        assert!(table.contains("2,000"));
    }

    #[test]
    fn entity_report_carries_the_narrative() {
        let report = sample_report();
        let window = FetchWindow {
            start: Period::new(2023, 1).unwrap(),
            end: Period::new(2024, 1).unwrap(),
        };
        let text = format_entity_report(&report, &window, 12);
        assert!(text.contains("Country: Kazakhstan (COPR_KZ)"));
        assert!(text.contains("Window: 2023-01..2024-01"));
        assert!(text.contains("As of Jan 2024, Kazakhstan produced 2,000 kb/d."));
    }

    #[test]
    fn batch_summary_isolates_failures() {
        let results = vec![
            ("Kazakhstan".to_string(), Ok(sample_report())),
            (
                "Oman".to_string(),
                Err(AppError::new(4, "STEO request failed with status 500.")),
            ),
        ];
        let text = format_batch_summary(&results);
        assert!(text.contains("As of Jan 2024, Kazakhstan produced"));
        assert!(text.contains("Oman: fetch failed"));
        assert!(text.contains("1 countries reported, 1 failed."));
    }
}
