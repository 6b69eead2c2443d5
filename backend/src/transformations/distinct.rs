use std::collections::BTreeSet;

use crate::models::NormalizedRecord;
use crate::transformations::criteria::Dimension;

/// Sorted distinct values of a column, absent and empty values excluded.
///
/// List dimensions are flattened. Years sort as text here; use
/// [`distinct_years`] for numeric order.
pub fn distinct_values(records: &[NormalizedRecord], dimension: Dimension) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| dimension.values(r))
        .filter(|v| !v.is_empty())
        .map(|v| v.into_owned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn distinct_years(records: &[NormalizedRecord]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every steward named in any record's steward list, sorted.
pub fn distinct_stewards(records: &[NormalizedRecord]) -> Vec<String> {
    distinct_values(records, Dimension::Steward)
}

/// Every outcome token in any record's outcome list, sorted.
pub fn distinct_outcomes(records: &[NormalizedRecord]) -> Vec<String> {
    distinct_values(records, Dimension::Outcome)
}
