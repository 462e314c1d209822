//! Period-over-period change analysis.
//!
//! `analyze` turns a normalized series into per-month change records; it is a
//! pure function of its input. `summarize` distills the latest record into a
//! headline summary with a narrative string.
//!
//! The YoY reference is found by **calendar-month equality** (period-key map),
//! never by a fixed index offset: a missing month anywhere in the history
//! would silently misalign an index-minus-12 lookup, whereas the key lookup
//! correctly leaves `yoy` absent across the gap.

use std::collections::HashMap;

use crate::domain::{AnalysisSummary, ChangeRecord, Period, Series};
use crate::error::AnalysisError;

/// Compute one `ChangeRecord` per observation, in series order.
///
/// `mom[i]` compares against the previous observation in the sequence;
/// `yoy` compares against the observation exactly 12 calendar months earlier,
/// if one exists. Percentages against a zero (or non-finite) reference value
/// are treated as absent rather than propagating a non-finite number.
pub fn analyze(series: &Series) -> Vec<ChangeRecord> {
    let by_period: HashMap<Period, f64> = series
        .observations()
        .iter()
        .map(|o| (o.period, o.value))
        .collect();

    let observations = series.observations();
    let mut out = Vec::with_capacity(observations.len());
    for (i, obs) in observations.iter().enumerate() {
        let mom = if i == 0 {
            None
        } else {
            pct_change(observations[i - 1].value, obs.value)
        };
        let yoy = by_period
            .get(&obs.period.minus_months(12))
            .and_then(|&year_ago| pct_change(year_ago, obs.value));
        out.push(ChangeRecord {
            period: obs.period,
            value: obs.value,
            mom,
            yoy,
        });
    }
    out
}

/// Distill the latest change record into an `AnalysisSummary`.
pub fn summarize(
    changes: &[ChangeRecord],
    entity_name: &str,
) -> Result<AnalysisSummary, AnalysisError> {
    let latest = changes
        .iter()
        .max_by_key(|r| r.period)
        .ok_or_else(|| AnalysisError::InsufficientData(entity_name.to_string()))?;

    Ok(AnalysisSummary {
        entity_name: entity_name.to_string(),
        period_label: latest.period.label(),
        latest_value: latest.value,
        mom_pct: latest.mom,
        yoy_pct: latest.yoy,
        narrative: build_narrative(entity_name, latest),
    })
}

/// Percentage change from `base` to `now`; `None` when the result would not
/// be finite (zero or non-finite reference).
fn pct_change(base: f64, now: f64) -> Option<f64> {
    if base == 0.0 || !base.is_finite() {
        return None;
    }
    let pct = (now - base) / base * 100.0;
    pct.is_finite().then_some(pct)
}

fn build_narrative(entity_name: &str, latest: &ChangeRecord) -> String {
    let yoy_clause = match latest.yoy {
        Some(pct) if pct > 0.0 => format!("a rise of {:.1}% YoY", pct.abs()),
        Some(pct) => format!("a decline of {:.1}% YoY", pct.abs()),
        None => "an unavailable YoY change".to_string(),
    };
    let mom_clause = match latest.mom {
        Some(pct) if pct > 0.0 => format!("an increase of {:.1}% MoM", pct.abs()),
        Some(pct) => format!("a drop of {:.1}% MoM", pct.abs()),
        None => "an unavailable MoM change".to_string(),
    };
    format!(
        "As of {}, {} produced {} kb/d. This represents {yoy_clause} and {mom_clause}.",
        latest.period.label(),
        entity_name,
        fmt_thousands(latest.value),
    )
}

/// Format a value with thousands separators and no decimals, e.g. `10,234`.
pub fn fmt_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;

    fn p(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn series(obs: &[(i32, u32, f64)]) -> Series {
        Series::new(
            "TEST",
            obs.iter()
                .map(|&(y, m, v)| Observation { period: p(y, m), value: v })
                .collect(),
        )
    }

    #[test]
    fn mom_absent_first_then_exact() {
        let changes = analyze(&series(&[(2023, 1, 100.0), (2023, 2, 110.0), (2023, 3, 99.0)]));
        assert_eq!(changes[0].mom, None);
        assert!((changes[1].mom.unwrap() - 10.0).abs() < 1e-9);
        assert!((changes[2].mom.unwrap() - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn yoy_uses_calendar_lookup_not_index_offset() {
        // 2023-01, 2023-02, 2024-01: a naive index-minus-12 finds nothing here,
        // and with a longer gapped history it would find the *wrong* month.
        let changes = analyze(&series(&[
            (2023, 1, 100.0),
            (2023, 2, 110.0),
            (2024, 1, 120.0),
        ]));
        assert_eq!(changes[1].yoy, None);
        assert!((changes[1].mom.unwrap() - 10.0).abs() < 1e-9);
        assert!((changes[2].mom.unwrap() - 9.0909).abs() < 1e-3);
        assert!((changes[2].yoy.unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn yoy_absent_across_gaps() {
        // 2023-02 is missing, so 2024-02 has no year-ago reference even though
        // 12 rows of history would exist in a denser series.
        let changes = analyze(&series(&[
            (2023, 1, 100.0),
            (2023, 3, 105.0),
            (2024, 2, 112.0),
        ]));
        assert_eq!(changes[2].yoy, None);
    }

    #[test]
    fn short_series_has_all_fields_absent() {
        let changes = analyze(&series(&[(2024, 1, 100.0)]));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].mom, None);
        assert_eq!(changes[0].yoy, None);

        assert!(analyze(&Series::empty("TEST")).is_empty());
    }

    #[test]
    fn zero_reference_value_yields_absent_change() {
        let changes = analyze(&series(&[(2023, 1, 0.0), (2023, 2, 50.0), (2024, 1, 60.0)]));
        assert_eq!(changes[1].mom, None);
        assert_eq!(changes[2].yoy, None);
        assert!(changes[2].mom.is_some());
    }

    #[test]
    fn analyze_is_pure() {
        let s = series(&[(2023, 1, 100.0), (2023, 2, 110.0), (2024, 1, 120.0)]);
        assert_eq!(analyze(&s), analyze(&s));
    }

    #[test]
    fn unsorted_input_is_normalized_before_analysis() {
        // Series::new sorts, so the analyzer sees chronological order no
        // matter how the provider returned the rows.
        let sorted = series(&[(2023, 1, 100.0), (2023, 2, 110.0)]);
        let reversed = series(&[(2023, 2, 110.0), (2023, 1, 100.0)]);
        assert_eq!(analyze(&sorted), analyze(&reversed));
    }

    #[test]
    fn summarize_picks_latest_record() {
        let changes = analyze(&series(&[
            (2023, 1, 1900.0),
            (2023, 2, 1850.0),
            (2024, 1, 2000.0),
        ]));
        let summary = summarize(&changes, "Kazakhstan").unwrap();
        assert_eq!(summary.entity_name, "Kazakhstan");
        assert_eq!(summary.period_label, "Jan 2024");
        assert!((summary.latest_value - 2000.0).abs() < 1e-9);
        assert!(summary.yoy_pct.is_some());
        assert_eq!(
            summary.narrative,
            "As of Jan 2024, Kazakhstan produced 2,000 kb/d. This represents \
             a rise of 5.3% YoY and an increase of 8.1% MoM."
        );
    }

    #[test]
    fn summarize_on_empty_changes_is_insufficient_data() {
        let err = summarize(&[], "Oman").unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }

    #[test]
    fn narrative_spells_out_unavailable_changes() {
        let changes = analyze(&series(&[(2024, 1, 500.0)]));
        let summary = summarize(&changes, "Brunei").unwrap();
        assert_eq!(
            summary.narrative,
            "As of Jan 2024, Brunei produced 500 kb/d. This represents \
             an unavailable YoY change and an unavailable MoM change."
        );
    }

    #[test]
    fn narrative_uses_decline_and_drop_for_negatives() {
        let changes = analyze(&series(&[
            (2023, 1, 1000.0),
            (2023, 12, 990.0),
            (2024, 1, 900.0),
        ]));
        let summary = summarize(&changes, "Russia").unwrap();
        assert_eq!(
            summary.narrative,
            "As of Jan 2024, Russia produced 900 kb/d. This represents \
             a decline of 10.0% YoY and a drop of 9.1% MoM."
        );
    }

    #[test]
    fn thousands_formatting() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(999.4), "999");
        assert_eq!(fmt_thousands(1000.0), "1,000");
        assert_eq!(fmt_thousands(10234.6), "10,235");
        assert_eq!(fmt_thousands(1234567.0), "1,234,567");
        assert_eq!(fmt_thousands(-10234.6), "-10,235");
        assert_eq!(fmt_thousands(-0.2), "0");
    }
}
