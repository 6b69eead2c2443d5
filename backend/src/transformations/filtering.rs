use std::collections::BTreeSet;

use crate::models::NormalizedRecord;
use crate::transformations::criteria::{Dimension, FilterCriteria};

/// Keep records satisfying every constrained dimension.
///
/// Scalar dimensions match on membership, list dimensions on a non-empty
/// intersection. No constraints returns a copy of the input in order.
pub fn apply_filters(
    records: &[NormalizedRecord],
    criteria: &FilterCriteria,
) -> Vec<NormalizedRecord> {
    let constraints: Vec<_> = criteria.constraints().collect();
    records
        .iter()
        .filter(|r| {
            constraints
                .iter()
                .all(|(dimension, selected)| dimension.matches(r, selected))
        })
        .cloned()
        .collect()
}

/// Filter on a single dimension.
pub fn filter_by_dimension<S: AsRef<str>>(
    records: &[NormalizedRecord],
    dimension: Dimension,
    values: &[S],
) -> Vec<NormalizedRecord> {
    let criteria = FilterCriteria::new().with(dimension, values);
    apply_filters(records, &criteria)
}

/// Whether a record passes the criteria.
pub fn matches(record: &NormalizedRecord, criteria: &FilterCriteria) -> bool {
    criteria
        .constraints()
        .all(|(dimension, selected)| dimension.matches(record, selected))
}

/// Race options for the selected years; every race when no year is selected.
pub fn races_for_years(records: &[NormalizedRecord], years: &BTreeSet<i64>) -> Vec<String> {
    records
        .iter()
        .filter(|r| years.is_empty() || r.year.is_some_and(|y| years.contains(&y)))
        .filter_map(|r| r.race.as_deref())
        .filter(|race| !race.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
