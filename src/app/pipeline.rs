//! Shared "fetch → analyze → summarize" pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! STEO fetch -> normalize -> change analysis -> summary
//!
//! Each entity's run is independent: its series, change records, and summary
//! are owned per run and discarded after the display/export layer consumes
//! them. Batch mode fans out over the catalog with per-entity failure
//! isolation.

use rayon::prelude::*;

use crate::analysis::{analyze, summarize};
use crate::data::EiaClient;
use crate::domain::{AnalysisSummary, ChangeRecord, EntityCatalog, FetchWindow, Series};
use crate::error::AppError;

/// All computed outputs for one entity.
#[derive(Debug, Clone)]
pub struct EntityReport {
    pub entity_name: String,
    pub series_id: String,
    pub series: Series,
    pub changes: Vec<ChangeRecord>,
    pub summary: AnalysisSummary,
}

/// Run the pipeline for one country, resolving its series id via the catalog.
pub fn run_entity(
    client: &EiaClient,
    catalog: &EntityCatalog,
    country: &str,
    window: &FetchWindow,
) -> Result<EntityReport, AppError> {
    let series_id = catalog.series_id(country).ok_or_else(|| {
        let known: Vec<&str> = catalog.entries().map(|(name, _)| name).collect();
        AppError::new(
            2,
            format!("Unknown country '{country}'. Tracked countries: {}.", known.join(", ")),
        )
    })?;
    // Use the catalog's canonical casing in output.
    let entity_name = catalog.entity_name(series_id).unwrap_or(country).to_string();
    run_series(client, &entity_name, series_id, window)
}

/// Run the pipeline for one (name, series id) pair.
pub fn run_series(
    client: &EiaClient,
    entity_name: &str,
    series_id: &str,
    window: &FetchWindow,
) -> Result<EntityReport, AppError> {
    let series = client.fetch(series_id, window)?;
    let changes = analyze(&series);
    let summary = summarize(&changes, entity_name)?;

    Ok(EntityReport {
        entity_name: entity_name.to_string(),
        series_id: series_id.to_string(),
        series,
        changes,
        summary,
    })
}

/// Run the pipeline for every catalog entry, in parallel.
///
/// Results come back in catalog order. One country's failure is captured in
/// its own `Result` and never aborts the rest.
pub fn run_batch(
    client: &EiaClient,
    catalog: &EntityCatalog,
    window: &FetchWindow,
) -> Vec<(String, Result<EntityReport, AppError>)> {
    let entries: Vec<(String, String)> = catalog
        .entries()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect();

    entries
        .into_par_iter()
        .map(|(name, id)| {
            let result = run_series(client, &name, &id, window);
            (name, result)
        })
        .collect()
}
