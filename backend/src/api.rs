//! Public query surface.
//!
//! This file consolidates the operations a dashboard or report needs: load
//! the cached dataset, filter it, list filter options, aggregate, and run
//! steward analysis. Everything here re-exports or thinly wraps the
//! underlying modules.

pub use crate::config::{AnalysisConfig, PenaltiesConfig};
pub use crate::error::{LoadError, LoadResult};
pub use crate::models::{GridPenalty, NormalizedRecord};
pub use crate::services::{
    aggregate_by, analyze_steward, compare_entities, cumulative_penalty_points, entity_summary,
    entity_yearly_counts, explode_outcomes, incident_partners, involved_in, outcome_counts,
    overview, penalties_by_year, steward_averages, steward_team_breakdown,
    team_distribution_difference, top_values, BiasReport, CumulativePoint, DistributionBias,
    EntityColumn, EntitySummary, EntityTotal, Metric, OverviewStats, SeverityBand,
    StewardAverage, TeamDriverCount, TeamShareDifference, YearlyCount,
};
pub use crate::store::{init_dataset, invalidate, Dataset};
pub use crate::transformations::{
    distinct_outcomes, distinct_stewards, distinct_values, distinct_years, races_for_years,
    Dimension, FilterCriteria,
};

use std::sync::Arc;

use crate::transformations::apply_filters;

/// The cached dataset, loaded from the resolved configuration on first use.
pub fn load() -> LoadResult<Arc<Dataset>> {
    crate::store::load()
}

/// Records matching the criteria, as a new collection.
pub fn filter(records: &[NormalizedRecord], criteria: &FilterCriteria) -> Vec<NormalizedRecord> {
    apply_filters(records, criteria)
}

/// Load the cached dataset and filter it.
pub fn load_filtered(criteria: &FilterCriteria) -> LoadResult<Vec<NormalizedRecord>> {
    let dataset = load()?;
    Ok(filter(dataset.records(), criteria))
}
