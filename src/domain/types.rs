//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during analysis
//! - exported to JSON/CSV
//! - consumed by any display layer without it reaching back into the core

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month (year + month). The atomic time unit of the dataset;
/// day-of-month is irrelevant.
///
/// The derived `Ord` is lexicographic on `(year, month)`, which is exactly
/// chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period; `month` must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The period containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month (local time).
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The period exactly `n` calendar months earlier.
    ///
    /// This is calendar arithmetic, not day arithmetic: Jan 2024 minus 12
    /// months is Jan 2023 regardless of leap years.
    pub fn minus_months(self, n: u32) -> Self {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) - n as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Parse `YYYY-MM`; a trailing `-DD` day component is tolerated and ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (year_s, rest) = s.split_once('-')?;
        let month_s = rest.get(0..2)?;
        if rest.len() > 2 && !rest[2..].starts_with('-') {
            return None;
        }
        let year = year_s.parse::<i32>().ok()?;
        let month = month_s.parse::<u32>().ok()?;
        Self::new(year, month)
    }

    /// Human-readable label, e.g. `Jan 2024`.
    pub fn label(self) -> String {
        format!("{} {}", MONTH_LABELS[(self.month - 1) as usize], self.year)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Period::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid period '{s}'")))
    }
}

/// One monthly production value, immutable once fetched. Values are kb/d.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Period,
    pub value: f64,
}

/// An ordered sequence of observations for one entity.
///
/// Invariant: observations are strictly increasing by period with no
/// duplicates. The constructor enforces this (sort + dedup), so the analyzer
/// can never see unsorted input. Created fresh per fetch; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    entity_id: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from raw observations, sorting ascending by period.
    ///
    /// Duplicate periods keep the first occurrence (the sort is stable).
    pub fn new(entity_id: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.period);
        observations.dedup_by_key(|o| o.period);
        Self {
            entity_id: entity_id.into(),
            observations,
        }
    }

    pub fn empty(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            observations: Vec::new(),
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

/// Per-observation derived changes.
///
/// `mom` is absent for the first observation; `yoy` is absent unless an
/// observation exists exactly 12 calendar months earlier. Either is also
/// absent when the reference value is zero (the percentage would not be
/// finite).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub period: Period,
    pub value: f64,
    pub mom: Option<f64>,
    pub yoy: Option<f64>,
}

/// Headline analysis for one entity, derived from its latest change record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub entity_name: String,
    pub period_label: String,
    pub latest_value: f64,
    pub mom_pct: Option<f64>,
    pub yoy_pct: Option<f64>,
    pub narrative: String,
}

/// Inclusive period bounds for a fetch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: Period,
    pub end: Period,
}

impl FetchWindow {
    /// The default history start carried over from the dashboard this tool
    /// replaces (STEO monthly coverage is solid from 2018 on).
    pub fn default_start() -> Period {
        Period { year: 2018, month: 1 }
    }
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            start: Self::default_start(),
            end: Period::current(),
        }
    }
}
