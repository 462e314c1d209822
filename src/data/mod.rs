//! Data provider integrations.

pub mod eia;

pub use eia::*;
