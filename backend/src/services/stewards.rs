//! Steward severity and team-distribution analysis.
//!
//! A steward's severity is the average penalty points per incident they
//! judged, compared against every steward with enough incidents to be
//! meaningful. Team distribution compares the share of penalties each team
//! received from the steward with the share across the whole record set.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::AnalysisConfig;
use crate::models::NormalizedRecord;
use crate::services::statistics::{chi_square_test, mean, sample_std_dev};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StewardAverage {
    pub steward: String,
    pub incidents: usize,
    pub total_penalty_points: i64,
    /// Total points divided by all incidents, including those without points.
    pub avg_penalty_points: f64,
}

/// Average penalty points for stewards with at least `min_incidents`
/// incidents, highest average first.
pub fn steward_averages(
    records: &[NormalizedRecord],
    min_incidents: usize,
) -> Vec<StewardAverage> {
    let mut stats: HashMap<&str, (usize, i64)> = HashMap::new();
    for record in records {
        let points = record.penalty_points.unwrap_or(0);
        let mut seen: Vec<&str> = Vec::new();
        for steward in &record.stewards_list {
            if seen.contains(&steward.as_str()) {
                continue;
            }
            seen.push(steward);
            let entry = stats.entry(steward).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += points;
        }
    }

    let mut averages: Vec<StewardAverage> = stats
        .into_iter()
        .filter(|(_, (incidents, _))| *incidents >= min_incidents && *incidents > 0)
        .map(|(steward, (incidents, total))| StewardAverage {
            steward: steward.to_string(),
            incidents,
            total_penalty_points: total,
            avg_penalty_points: total as f64 / incidents as f64,
        })
        .collect();
    averages.sort_by(|a, b| {
        b.avg_penalty_points
            .partial_cmp(&a.avg_penalty_points)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.steward.cmp(&b.steward))
    });
    averages
}

/// Severity label derived from a z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    NotablyHarsh,
    SlightlyHarsh,
    Average,
    SlightlyLenient,
    NotablyLenient,
}

impl SeverityBand {
    pub fn from_z_score(z: f64) -> Self {
        if z > 1.5 {
            SeverityBand::NotablyHarsh
        } else if z > 0.5 {
            SeverityBand::SlightlyHarsh
        } else if z >= -0.5 {
            SeverityBand::Average
        } else if z >= -1.5 {
            SeverityBand::SlightlyLenient
        } else {
            SeverityBand::NotablyLenient
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::NotablyHarsh => "Notably Harsh",
            SeverityBand::SlightlyHarsh => "Slightly Harsh",
            SeverityBand::Average => "Average",
            SeverityBand::SlightlyLenient => "Slightly Lenient",
            SeverityBand::NotablyLenient => "Notably Lenient",
        }
    }
}

/// Outcome of the team-distribution test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionBias {
    SignificantlyUnusual,
    Unusual,
    Normal,
    /// Fewer than two teams to compare.
    NotApplicable,
}

impl DistributionBias {
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.01 {
            DistributionBias::SignificantlyUnusual
        } else if p < 0.05 {
            DistributionBias::Unusual
        } else {
            DistributionBias::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistributionBias::SignificantlyUnusual => "Significantly Unusual",
            DistributionBias::Unusual => "Unusual Team Distribution",
            DistributionBias::Normal => "Normal Distribution",
            DistributionBias::NotApplicable => "Not Applicable",
        }
    }
}

macro_rules! label_serde_display {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    )*};
}

label_serde_display!(SeverityBand, DistributionBias);

/// Severity of one steward relative to the qualifying population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityScore {
    pub z_score: f64,
    pub band: SeverityBand,
    pub population_mean: f64,
    pub population_size: usize,
    /// The steward's own average, when they qualify for the population.
    pub steward_average: Option<f64>,
}

/// z-score of `steward` against stewards with at least `min_incidents`.
///
/// z is 0.0 when the population has fewer than two stewards, the spread is
/// zero, or the steward is not in the population.
pub fn severity_score(
    records: &[NormalizedRecord],
    steward: &str,
    min_incidents: usize,
) -> SeverityScore {
    let population = steward_averages(records, min_incidents);
    let averages: Vec<f64> = population.iter().map(|s| s.avg_penalty_points).collect();
    let population_mean = mean(&averages);
    let steward_average = population
        .iter()
        .find(|s| s.steward == steward)
        .map(|s| s.avg_penalty_points);

    let z_score = match (steward_average, sample_std_dev(&averages)) {
        (Some(avg), Some(std)) if std > 0.0 => (avg - population_mean) / std,
        _ => 0.0,
    };

    SeverityScore {
        z_score,
        band: SeverityBand::from_z_score(z_score),
        population_mean,
        population_size: population.len(),
        steward_average,
    }
}

/// Team-distribution comparison for one steward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDistributionTest {
    pub bias: DistributionBias,
    #[serde(serialize_with = "serialize_optional_stat")]
    pub chi_square: Option<f64>,
    #[serde(serialize_with = "serialize_optional_stat")]
    pub p_value: Option<f64>,
    /// (team, observed, expected) for every team with expected > 0.
    pub teams: Vec<(String, f64, f64)>,
}

/// Normalized team frequencies; records without a team are ignored.
fn team_frequencies<'a, I>(records: I) -> Vec<(&'a str, f64)>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for team in records.into_iter().filter_map(|r| r.team.as_deref()) {
        *counts.entry(team).or_default() += 1;
        total += 1;
    }
    let mut frequencies: Vec<(&str, f64)> = counts
        .into_iter()
        .map(|(team, count)| (team, count as f64 / total as f64))
        .collect();
    frequencies.sort_by(|a, b| a.0.cmp(b.0));
    frequencies
}

/// Chi-square test of the steward's team shares against the overall shares.
pub fn team_distribution_test(
    records: &[NormalizedRecord],
    steward: &str,
) -> TeamDistributionTest {
    let steward_records: Vec<&NormalizedRecord> =
        records.iter().filter(|r| r.has_steward(steward)).collect();
    let incidents = steward_records.len() as f64;

    let overall = team_frequencies(records);
    let own: HashMap<&str, f64> = team_frequencies(steward_records.iter().copied())
        .into_iter()
        .collect();

    let teams: Vec<(String, f64, f64)> = overall
        .iter()
        .map(|(team, share)| {
            let expected = share * incidents;
            let observed = own.get(team).copied().unwrap_or(0.0) * incidents;
            (team.to_string(), observed, expected)
        })
        .filter(|(_, _, expected)| *expected > 0.0)
        .collect();

    let pairs: Vec<(f64, f64)> = teams.iter().map(|(_, o, e)| (*o, *e)).collect();
    match chi_square_test(&pairs) {
        Some(test) => TeamDistributionTest {
            bias: DistributionBias::from_p_value(test.p_value),
            chi_square: Some(test.statistic),
            p_value: Some(test.p_value),
            teams,
        },
        None => TeamDistributionTest {
            bias: DistributionBias::NotApplicable,
            chi_square: None,
            p_value: None,
            teams,
        },
    }
}

/// Combined severity and team-distribution findings for a steward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasReport {
    pub steward: String,
    pub incident_count: usize,
    /// Distinct (year, race) weekends the steward sat on.
    pub panels: usize,
    pub avg_penalty_points: f64,
    pub population_mean: f64,
    /// Average against the population mean in percent; 0 when the mean is 0.
    pub diff_pct: f64,
    pub population_size: usize,
    pub z_score: f64,
    pub severity: SeverityBand,
    pub distribution: DistributionBias,
    #[serde(serialize_with = "serialize_optional_stat")]
    pub chi_square: Option<f64>,
    #[serde(serialize_with = "serialize_optional_stat")]
    pub p_value: Option<f64>,
}

impl fmt::Display for BiasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} incidents over {} panels)",
            self.steward, self.incident_count, self.panels
        )?;
        writeln!(
            f,
            "  Avg penalty points: {:.2} ({:+.1}% vs population mean {:.2} over {} stewards)",
            self.avg_penalty_points, self.diff_pct, self.population_mean, self.population_size
        )?;
        writeln!(f, "  Z-score: {:.2} ({})", self.z_score, self.severity)?;
        write!(
            f,
            "  Chi-square: {}, p-value: {} ({})",
            format_stat(self.chi_square, 2),
            format_stat(self.p_value, 4),
            self.distribution
        )
    }
}

/// Severity and team-distribution analysis of one steward over `records`.
pub fn analyze_steward(
    records: &[NormalizedRecord],
    steward: &str,
    config: &AnalysisConfig,
) -> BiasReport {
    let steward_records: Vec<&NormalizedRecord> =
        records.iter().filter(|r| r.has_steward(steward)).collect();
    let incident_count = steward_records.len();
    let total_points: i64 = steward_records.iter().filter_map(|r| r.penalty_points).sum();
    let avg_penalty_points = if incident_count > 0 {
        total_points as f64 / incident_count as f64
    } else {
        0.0
    };

    let panels = steward_records
        .iter()
        .map(|r| (r.year, r.race.as_deref()))
        .collect::<HashSet<_>>()
        .len();

    let severity = severity_score(records, steward, config.severity_min_incidents);
    let distribution = team_distribution_test(records, steward);
    let diff_pct = if severity.population_mean > 0.0 {
        (avg_penalty_points - severity.population_mean) / severity.population_mean * 100.0
    } else {
        0.0
    };

    BiasReport {
        steward: steward.to_string(),
        incident_count,
        panels,
        avg_penalty_points,
        population_mean: severity.population_mean,
        diff_pct,
        population_size: severity.population_size,
        z_score: severity.z_score,
        severity: severity.band,
        distribution: distribution.bias,
        chi_square: distribution.chi_square,
        p_value: distribution.p_value,
    }
}

/// Penalties per (team, driver) pair judged by the steward, teams with the
/// most penalties first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDriverCount {
    pub team: String,
    pub driver: String,
    pub count: usize,
}

pub fn steward_team_breakdown(
    records: &[NormalizedRecord],
    steward: &str,
) -> Vec<TeamDriverCount> {
    let mut pairs: HashMap<(&str, &str), usize> = HashMap::new();
    let mut team_totals: HashMap<&str, usize> = HashMap::new();
    for record in records.iter().filter(|r| r.has_steward(steward)) {
        if let (Some(team), Some(driver)) = (record.team.as_deref(), record.driver.as_deref()) {
            *pairs.entry((team, driver)).or_default() += 1;
            *team_totals.entry(team).or_default() += 1;
        }
    }

    let mut rows: Vec<TeamDriverCount> = pairs
        .into_iter()
        .map(|((team, driver), count)| TeamDriverCount {
            team: team.to_string(),
            driver: driver.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        let total = |t: &str| team_totals.get(t).copied().unwrap_or(0);
        total(&b.team)
            .cmp(&total(&a.team))
            .then_with(|| a.team.cmp(&b.team))
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.driver.cmp(&b.driver))
    });
    rows
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamShareDifference {
    pub team: String,
    pub overall_share: f64,
    pub steward_share: f64,
    /// (steward - overall) / overall * 100, rounded to one decimal.
    pub difference_pct: f64,
}

/// Per-team percentage difference between the steward's share of penalties
/// and the overall share, most under-represented first.
///
/// Empty when the steward judged no incidents.
pub fn team_distribution_difference(
    records: &[NormalizedRecord],
    steward: &str,
) -> Vec<TeamShareDifference> {
    let steward_records: Vec<&NormalizedRecord> =
        records.iter().filter(|r| r.has_steward(steward)).collect();
    if steward_records.is_empty() {
        return Vec::new();
    }

    let own: HashMap<&str, f64> = team_frequencies(steward_records.iter().copied())
        .into_iter()
        .collect();
    let mut rows: Vec<TeamShareDifference> = team_frequencies(records)
        .into_iter()
        .map(|(team, overall_share)| {
            let steward_share = own.get(team).copied().unwrap_or(0.0);
            let difference = (steward_share - overall_share) / overall_share * 100.0;
            TeamShareDifference {
                team: team.to_string(),
                overall_share,
                steward_share,
                difference_pct: (difference * 10.0).round() / 10.0,
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        a.difference_pct
            .partial_cmp(&b.difference_pct)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.team.cmp(&b.team))
    });
    rows
}

fn format_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "N/A".to_string(),
    }
}

fn serialize_optional_stat<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str("N/A"),
    }
}
