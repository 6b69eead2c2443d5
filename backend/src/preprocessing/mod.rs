//! Record normalization.
//!
//! Turns raw sheet rows into [`NormalizedRecord`](crate::models::NormalizedRecord)s:
//! type coercion, grid penalty derivation, alias resolution, list
//! materialization and removal of invalid rows. Each row is transformed
//! independently into a new record.

pub mod coercion;
pub mod normalizer;

#[cfg(test)]
mod normalizer_tests;

pub use normalizer::{normalize, normalize_row, normalize_with_summary, NormalizationSummary};
