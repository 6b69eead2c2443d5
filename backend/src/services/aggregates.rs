use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::NormalizedRecord;
use crate::transformations::Dimension;

/// Column an aggregate groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityColumn {
    Driver,
    Team,
    /// Each steward on a record's panel forms its own group.
    Steward,
}

impl EntityColumn {
    /// Distinct entity names on a record.
    pub fn names(self, record: &NormalizedRecord) -> Vec<&str> {
        match self {
            EntityColumn::Driver => record.driver.as_deref().into_iter().collect(),
            EntityColumn::Team => record.team.as_deref().into_iter().collect(),
            EntityColumn::Steward => {
                let mut seen = BTreeSet::new();
                record
                    .stewards_list
                    .iter()
                    .map(String::as_str)
                    .filter(|s| seen.insert(*s))
                    .collect()
            }
        }
    }

    fn involves(self, record: &NormalizedRecord, name: &str) -> bool {
        self.names(record).contains(&name)
    }
}

/// Quantity summed per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Count,
    PenaltyPoints,
    Fine,
    TimePenalty,
}

impl Metric {
    /// Contribution of one record; absent values contribute nothing.
    pub fn value(self, record: &NormalizedRecord) -> Option<f64> {
        match self {
            Metric::Count => Some(1.0),
            Metric::PenaltyPoints => record.penalty_points.map(|p| p as f64),
            Metric::Fine => record.fine,
            Metric::TimePenalty => record.time_penalty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTotal {
    pub name: String,
    pub value: f64,
    /// Records contributing to the group, present metric or not.
    pub incidents: usize,
}

/// Sum a metric per entity, sorted by value descending then name.
pub fn aggregate_by(
    records: &[NormalizedRecord],
    column: EntityColumn,
    metric: Metric,
) -> Vec<EntityTotal> {
    let mut groups: HashMap<&str, (f64, usize)> = HashMap::new();
    for record in records {
        let contribution = metric.value(record).unwrap_or(0.0);
        for name in column.names(record) {
            let entry = groups.entry(name).or_insert((0.0, 0));
            entry.0 += contribution;
            entry.1 += 1;
        }
    }

    let mut totals: Vec<EntityTotal> = groups
        .into_iter()
        .map(|(name, (value, incidents))| EntityTotal {
            name: name.to_string(),
            value,
            incidents,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    totals
}

/// Headline figures for a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewStats {
    pub total_penalties: usize,
    pub distinct_drivers: usize,
    pub total_fines: f64,
    pub total_penalty_points: i64,
}

pub fn overview(records: &[NormalizedRecord]) -> OverviewStats {
    OverviewStats {
        total_penalties: records.len(),
        distinct_drivers: records
            .iter()
            .filter_map(|r| r.driver.as_deref())
            .collect::<BTreeSet<_>>()
            .len(),
        total_fines: records.iter().filter_map(|r| r.fine).sum(),
        total_penalty_points: records.iter().filter_map(|r| r.penalty_points).sum(),
    }
}

/// Totals for one driver, team or steward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub name: String,
    pub incidents: usize,
    pub penalty_points: i64,
    pub fines: f64,
    pub time_penalty_seconds: f64,
    pub distinct_drivers: usize,
}

pub fn entity_summary(
    records: &[NormalizedRecord],
    column: EntityColumn,
    name: &str,
) -> EntitySummary {
    let matching: Vec<&NormalizedRecord> =
        records.iter().filter(|r| column.involves(r, name)).collect();

    EntitySummary {
        name: name.to_string(),
        incidents: matching.len(),
        penalty_points: matching.iter().filter_map(|r| r.penalty_points).sum(),
        fines: matching.iter().filter_map(|r| r.fine).sum(),
        time_penalty_seconds: matching.iter().filter_map(|r| r.time_penalty).sum(),
        distinct_drivers: matching
            .iter()
            .filter_map(|r| r.driver.as_deref())
            .collect::<BTreeSet<_>>()
            .len(),
    }
}

/// One summary per requested entity, in request order.
pub fn compare_entities<S: AsRef<str>>(
    records: &[NormalizedRecord],
    column: EntityColumn,
    names: &[S],
) -> Vec<EntitySummary> {
    names
        .iter()
        .map(|name| entity_summary(records, column, name.as_ref()))
        .collect()
}

/// Penalty counts per year, ascending. Records without a year are skipped.
pub fn penalties_by_year(records: &[NormalizedRecord]) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year) {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Penalty count for one entity in one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyCount {
    pub name: String,
    pub year: i64,
    pub count: usize,
}

/// Per-year penalty counts for each requested entity, grouped in request
/// order with years ascending. Years with no penalties are omitted, as are
/// records without a year.
pub fn entity_yearly_counts<S: AsRef<str>>(
    records: &[NormalizedRecord],
    column: EntityColumn,
    names: &[S],
) -> Vec<YearlyCount> {
    let mut counts: HashMap<&str, BTreeMap<i64, usize>> = HashMap::new();
    for record in records {
        let Some(year) = record.year else {
            continue;
        };
        for name in column.names(record) {
            *counts.entry(name).or_default().entry(year).or_default() += 1;
        }
    }

    let mut seen = BTreeSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| seen.insert(*name))
        .flat_map(|name| {
            counts
                .get(name)
                .into_iter()
                .flatten()
                .map(move |(year, count)| YearlyCount {
                    name: name.to_string(),
                    year: *year,
                    count: *count,
                })
        })
        .collect()
}

/// One `(record, outcome)` pair per outcome token.
pub fn explode_outcomes(records: &[NormalizedRecord]) -> Vec<(&NormalizedRecord, &str)> {
    records
        .iter()
        .flat_map(|r| r.outcome_list.iter().map(move |o| (r, o.as_str())))
        .collect()
}

/// Occurrences of each outcome token, most frequent first.
pub fn outcome_counts(records: &[NormalizedRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, outcome) in explode_outcomes(records) {
        *counts.entry(outcome).or_default() += 1;
    }
    sorted_counts(counts)
}

/// The `n` most frequent values of a column.
pub fn top_values(
    records: &[NormalizedRecord],
    dimension: Dimension,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        for value in dimension.values(record) {
            if !value.is_empty() {
                *counts.entry(value.into_owned()).or_default() += 1;
            }
        }
    }
    let mut sorted = sorted_counts(counts);
    sorted.truncate(n);
    sorted
}

/// Drivers most often named as the other party in `driver`'s penalties.
pub fn incident_partners(
    records: &[NormalizedRecord],
    driver: &str,
    n: usize,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| r.driver.as_deref() == Some(driver)) {
        if let Some(other) = record.incident_involving.as_deref() {
            *counts.entry(other).or_default() += 1;
        }
    }
    let mut sorted = sorted_counts(counts);
    sorted.truncate(n);
    sorted
}

/// Penalised drivers in incidents where `driver` was the other party.
pub fn involved_in(records: &[NormalizedRecord], driver: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records
        .iter()
        .filter(|r| r.incident_involving.as_deref() == Some(driver))
    {
        if let Some(penalised) = record.driver.as_deref() {
            *counts.entry(penalised).or_default() += 1;
        }
    }
    sorted_counts(counts)
}

/// Point on a driver's cumulative penalty points timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativePoint {
    pub year: Option<i64>,
    pub round: Option<i64>,
    pub race: Option<String>,
    pub penalty_points: i64,
    pub cumulative: i64,
}

/// Running penalty points total ordered by (year, round).
pub fn cumulative_penalty_points(
    records: &[NormalizedRecord],
    driver: &str,
) -> Vec<CumulativePoint> {
    let mut driver_records: Vec<&NormalizedRecord> = records
        .iter()
        .filter(|r| r.driver.as_deref() == Some(driver))
        .collect();
    // Stable sort keeps source order within a round; missing keys sort last.
    driver_records.sort_by_key(|r| {
        (
            r.year.is_none(),
            r.year,
            r.round.is_none(),
            r.round,
        )
    });

    let mut cumulative = 0;
    driver_records
        .into_iter()
        .map(|r| {
            let points = r.penalty_points.unwrap_or(0);
            cumulative += points;
            CumulativePoint {
                year: r.year,
                round: r.round,
                race: r.race.clone(),
                penalty_points: points,
                cumulative,
            }
        })
        .collect()
}

fn sorted_counts<K: AsRef<str>>(counts: HashMap<K, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
