//! EIA STEO API integration for monthly crude-oil production series.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{FetchWindow, Observation, Series};
use crate::error::{AppError, FetchError};

const BASE_URL: &str = "https://api.eia.gov/v2/steo/data/";

/// Upper bound on a single blocking request. The provider has no SLA; without
/// this a stalled connection would hang the whole run.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub struct EiaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl EiaClient {
    /// Build a client with the API key taken from `EIA_API_KEY` (environment
    /// or `.env`). The key is never compiled in.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("EIA_API_KEY")
            .map_err(|_| AppError::new(2, "Missing EIA_API_KEY in environment (.env)."))?;
        Self::with_api_key(api_key)
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one series over `window` and normalize it into a sorted `Series`.
    ///
    /// An empty payload is a valid empty series, not an error; records whose
    /// value is not numeric are dropped. Idempotent per (series_id, window)
    /// up to provider-side data revisions.
    pub fn fetch(&self, series_id: &str, window: &FetchWindow) -> Result<Series, FetchError> {
        let query = [
            ("api_key", self.api_key.clone()),
            ("frequency", "monthly".to_string()),
            ("data[0]", "value".to_string()),
            ("facets[seriesId][]", series_id.to_string()),
            ("start", window.start.to_string()),
            ("end", window.end.to_string()),
        ];

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .map_err(|e| FetchError::RequestFailed(format!("STEO request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(FetchError::RequestFailed(format!(
                "STEO request for {series_id} failed with status {}.",
                resp.status()
            )));
        }

        let body: SteoEnvelope = resp
            .json()
            .map_err(|e| FetchError::ParseFailure(format!("Failed to parse STEO response: {e}")))?;

        series_from_payload(series_id, body)
    }
}

#[derive(Debug, Deserialize)]
struct SteoEnvelope {
    response: SteoResponse,
}

#[derive(Debug, Deserialize)]
struct SteoResponse {
    #[serde(default)]
    data: Vec<SteoRecord>,
}

#[derive(Debug, Deserialize)]
struct SteoRecord {
    period: String,
    #[serde(default)]
    value: RawValue,
}

/// STEO serves values as numbers, strings, or null depending on vintage.
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawValue {
    fn as_finite(&self) -> Option<f64> {
        match self {
            RawValue::Number(v) if v.is_finite() => Some(*v),
            RawValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
            }
            _ => None,
        }
    }
}

/// Normalize a decoded payload: drop non-numeric values, surface malformed
/// periods, sort ascending (via `Series::new`).
fn series_from_payload(series_id: &str, body: SteoEnvelope) -> Result<Series, FetchError> {
    let mut observations = Vec::with_capacity(body.response.data.len());
    for record in body.response.data {
        let Some(value) = record.value.as_finite() else {
            continue;
        };
        let period = crate::domain::Period::parse(&record.period).ok_or_else(|| {
            FetchError::ParseFailure(format!("Invalid STEO period '{}'.", record.period))
        })?;
        observations.push(Observation { period, value });
    }
    Ok(Series::new(series_id, observations))
}
