//! Aggregation and statistics over normalized records.
//!
//! Every function takes a (usually already filtered) slice of records and
//! returns plain data: tables as vectors, scalars, or named statistics.
//! Underpowered statistics return sentinels rather than errors.

pub mod aggregates;
pub mod statistics;
pub mod stewards;

#[cfg(test)]
mod stewards_tests;

pub use aggregates::{
    aggregate_by, compare_entities, cumulative_penalty_points, entity_summary,
    entity_yearly_counts, explode_outcomes, incident_partners, involved_in, outcome_counts,
    overview, penalties_by_year, top_values, CumulativePoint, EntityColumn, EntitySummary,
    EntityTotal, Metric, OverviewStats, YearlyCount,
};
pub use statistics::{chi_square_test, mean, sample_std_dev, ChiSquareTest};
pub use stewards::{
    analyze_steward, severity_score, steward_averages, steward_team_breakdown,
    team_distribution_difference, team_distribution_test, BiasReport, DistributionBias,
    SeverityBand, SeverityScore, StewardAverage, TeamDistributionTest, TeamDriverCount,
    TeamShareDifference,
};
