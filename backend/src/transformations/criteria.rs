use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::models::NormalizedRecord;
use crate::preprocessing::coercion::parse_integer;

/// A column records can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Year,
    Race,
    Session,
    Driver,
    Team,
    Allegation,
    Outcome,
    Steward,
}

impl Dimension {
    pub const ALL: [Dimension; 8] = [
        Dimension::Year,
        Dimension::Race,
        Dimension::Session,
        Dimension::Driver,
        Dimension::Team,
        Dimension::Allegation,
        Dimension::Outcome,
        Dimension::Steward,
    ];

    /// Key used for this dimension in the dashboard filter store.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Year => "years",
            Dimension::Race => "races",
            Dimension::Session => "sessions",
            Dimension::Driver => "drivers",
            Dimension::Team => "teams",
            Dimension::Allegation => "allegations",
            Dimension::Outcome => "outcomes",
            Dimension::Steward => "stewards",
        }
    }

    /// Outcome and Steward hold lists; the others hold one value.
    pub fn is_list(self) -> bool {
        matches!(self, Dimension::Outcome | Dimension::Steward)
    }

    /// Every value the record carries for this dimension.
    ///
    /// Scalar dimensions yield zero or one value, list dimensions yield the
    /// list in source order.
    pub fn values(self, record: &NormalizedRecord) -> Vec<Cow<'_, str>> {
        fn scalar(field: &Option<String>) -> Vec<Cow<'_, str>> {
            field.as_deref().map(Cow::Borrowed).into_iter().collect()
        }
        fn list(items: &[String]) -> Vec<Cow<'_, str>> {
            items.iter().map(|s| Cow::Borrowed(s.as_str())).collect()
        }

        match self {
            Dimension::Year => record
                .year
                .map(|y| Cow::Owned(y.to_string()))
                .into_iter()
                .collect(),
            Dimension::Race => scalar(&record.race),
            Dimension::Session => scalar(&record.session),
            Dimension::Driver => scalar(&record.driver),
            Dimension::Team => scalar(&record.team),
            Dimension::Allegation => scalar(&record.allegation),
            Dimension::Outcome => list(&record.outcome_list),
            Dimension::Steward => list(&record.stewards_list),
        }
    }

    /// Whether any of the record's values is selected. An absent value never
    /// matches.
    pub fn matches(self, record: &NormalizedRecord, selected: &BTreeSet<String>) -> bool {
        match self {
            Dimension::Year => record
                .year
                .is_some_and(|y| selected.contains(&y.to_string())),
            Dimension::Outcome => record.outcome_list.iter().any(|o| selected.contains(o)),
            Dimension::Steward => record.stewards_list.iter().any(|s| selected.contains(s)),
            scalar => scalar
                .values(record)
                .first()
                .is_some_and(|v| selected.contains(v.as_ref())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Selected values per dimension.
///
/// A dimension with no selected values is unconstrained. Deserializes from
/// the dashboard filter-store shape:
///
/// ```
/// use penalty_insights::transformations::{Dimension, FilterCriteria};
///
/// let criteria: FilterCriteria =
///     serde_json::from_str(r#"{"years": [2023, "2024"], "stewards": ["Garry Connelly"], "teams": []}"#)
///         .unwrap();
/// assert!(criteria.is_constrained(Dimension::Year));
/// assert!(!criteria.is_constrained(Dimension::Team));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CriteriaShape", into = "CriteriaShape")]
pub struct FilterCriteria {
    selections: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add selected values for a dimension.
    pub fn with<I, S>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.insert(dimension, value.as_ref());
        }
        self
    }

    pub fn with_years<I: IntoIterator<Item = i64>>(mut self, years: I) -> Self {
        for year in years {
            self.insert(Dimension::Year, &year.to_string());
        }
        self
    }

    /// Select one value. Blank values are ignored; year text is stored in
    /// integer form so "2023.0" selects 2023.
    pub fn insert(&mut self, dimension: Dimension, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let value = match dimension {
            Dimension::Year => parse_integer(Some(value))
                .map(|y| y.to_string())
                .unwrap_or_else(|| value.to_string()),
            _ => value.to_string(),
        };
        self.selections.entry(dimension).or_default().insert(value);
    }

    /// Selected values, or `None` when the dimension is unconstrained.
    pub fn selected(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        self.selections.get(&dimension).filter(|set| !set.is_empty())
    }

    /// Selected years that are valid integers.
    pub fn years(&self) -> BTreeSet<i64> {
        self.selected(Dimension::Year)
            .map(|set| set.iter().filter_map(|y| y.parse().ok()).collect())
            .unwrap_or_default()
    }

    pub fn is_constrained(&self, dimension: Dimension) -> bool {
        self.selected(dimension).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints().next().is_none()
    }

    /// Constrained dimensions with their selections, in dimension order.
    pub fn constraints(&self) -> impl Iterator<Item = (Dimension, &BTreeSet<String>)> {
        self.selections
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(dim, set)| (*dim, set))
    }

    /// Merge per-dimension selections.
    ///
    /// Applying `a` then `b` equals applying `a.union(&b)` when the two
    /// constrain disjoint dimensions.
    pub fn union(&self, other: &FilterCriteria) -> FilterCriteria {
        let mut merged = self.clone();
        for (dimension, values) in other.constraints() {
            merged
                .selections
                .entry(dimension)
                .or_default()
                .extend(values.iter().cloned());
        }
        merged
    }

    /// Dimensions constrained by both.
    pub fn overlapping(&self, other: &FilterCriteria) -> Vec<Dimension> {
        self.constraints()
            .map(|(dim, _)| dim)
            .filter(|dim| other.is_constrained(*dim))
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum YearValue {
    Number(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct CriteriaShape {
    years: Vec<YearValue>,
    races: Vec<String>,
    sessions: Vec<String>,
    drivers: Vec<String>,
    teams: Vec<String>,
    allegations: Vec<String>,
    outcomes: Vec<String>,
    stewards: Vec<String>,
}

impl From<CriteriaShape> for FilterCriteria {
    fn from(shape: CriteriaShape) -> Self {
        let years = shape.years.into_iter().map(|y| match y {
            YearValue::Number(n) => n.to_string(),
            YearValue::Text(text) => text,
        });
        FilterCriteria::new()
            .with(Dimension::Year, years)
            .with(Dimension::Race, shape.races)
            .with(Dimension::Session, shape.sessions)
            .with(Dimension::Driver, shape.drivers)
            .with(Dimension::Team, shape.teams)
            .with(Dimension::Allegation, shape.allegations)
            .with(Dimension::Outcome, shape.outcomes)
            .with(Dimension::Steward, shape.stewards)
    }
}

impl From<FilterCriteria> for CriteriaShape {
    fn from(criteria: FilterCriteria) -> Self {
        let take = |dim: Dimension| -> Vec<String> {
            criteria
                .selected(dim)
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default()
        };
        let years = take(Dimension::Year)
            .into_iter()
            .map(|y| match y.parse::<i64>() {
                Ok(n) => YearValue::Number(n),
                Err(_) => YearValue::Text(y),
            })
            .collect();
        CriteriaShape {
            years,
            races: take(Dimension::Race),
            sessions: take(Dimension::Session),
            drivers: take(Dimension::Driver),
            teams: take(Dimension::Team),
            allegations: take(Dimension::Allegation),
            outcomes: take(Dimension::Outcome),
            stewards: take(Dimension::Steward),
        }
    }
}
