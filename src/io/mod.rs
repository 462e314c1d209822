//! Input/output helpers.
//!
//! - change-record CSV export (`export`)
//! - analysis-summary JSON export (`export`)

pub mod export;

pub use export::*;
