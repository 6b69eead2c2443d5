//! Filtering and distinct-value utilities over normalized records.
//!
//! Every operation takes a slice of records and returns a new collection;
//! the input is never modified.
//!
//! # Modules
//!
//! - [`criteria`]: Filter dimensions and selected values
//! - [`filtering`]: Apply criteria to records
//! - [`distinct`]: Sorted distinct values for filter options
//!
//! # Example
//!
//! ```
//! use penalty_insights::models::NormalizedRecord;
//! use penalty_insights::transformations::{apply_filters, Dimension, FilterCriteria};
//!
//! let mut record = NormalizedRecord::empty("2024");
//! record.team = Some("Ferrari".to_string());
//! let records = vec![record];
//!
//! let criteria = FilterCriteria::new().with(Dimension::Team, ["Ferrari"]);
//! assert_eq!(apply_filters(&records, &criteria).len(), 1);
//! ```

pub mod criteria;
pub mod distinct;
pub mod filtering;


pub use criteria::{Dimension, FilterCriteria};
pub use distinct::{distinct_outcomes, distinct_stewards, distinct_values, distinct_years};
pub use filtering::{apply_filters, filter_by_dimension, matches, races_for_years};
