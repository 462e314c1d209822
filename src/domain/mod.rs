//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - calendar-month periods (`Period`) and fetch windows (`FetchWindow`)
//! - normalized production observations (`Observation`, `Series`)
//! - analysis outputs (`ChangeRecord`, `AnalysisSummary`)
//! - the country catalog (`EntityCatalog`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
