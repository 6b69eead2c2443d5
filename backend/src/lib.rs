//! # Penalty Insights
//!
//! Ingestion, canonicalization and statistical analysis of Formula 1
//! stewarding penalty records.
//!
//! The source is a season workbook: one sheet per season, exported as CSV.
//! Rows are normalized once per process into an immutable table of
//! [`models::NormalizedRecord`]s that every query reads from.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`aliases`]: Static alias tables correcting misspelled identifiers
//! - [`parsing`]: Workbook reader and column schema checks
//! - [`preprocessing`]: Per-row coercion and canonicalization
//! - [`store`]: Process-wide dataset cache with explicit invalidation
//! - [`transformations`]: Multi-dimensional filtering and distinct values
//! - [`services`]: Aggregates and steward bias statistics
//! - [`api`]: Consolidated query surface
//! - [`config`]: `penalties.toml` settings
//!
//! ## Example
//!
//! ```no_run
//! use penalty_insights::api::{self, FilterCriteria};
//!
//! let dataset = api::load().expect("Failed to load penalties");
//! let criteria = FilterCriteria::new().with_years([2024]);
//! let season = api::filter(dataset.records(), &criteria);
//!
//! let stewards = api::distinct_stewards(&season);
//! if let Some(steward) = stewards.first() {
//!     let report = api::analyze_steward(&season, steward, &Default::default());
//!     println!("{}", report);
//! }
//! ```

// Allow large error types - LoadError carries an ErrorContext for debugging
#![allow(clippy::result_large_err)]

pub mod aliases;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod store;
pub mod transformations;

pub use error::{LoadError, LoadResult};
