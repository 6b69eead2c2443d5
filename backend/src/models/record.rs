use serde::{Serialize, Serializer};
use std::fmt;

/// Grid position penalty applied for the back of the grid.
pub const BACK_OF_GRID_POSITIONS: i64 = 19;

/// One sheet row exactly as read from the workbook.
///
/// Every cell is optional text; blank cells are `None`. No trimming or
/// coercion happens here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub year: Option<String>,
    pub round: Option<String>,
    pub race: Option<String>,
    pub session: Option<String>,
    pub driver: Option<String>,
    pub team: Option<String>,
    pub allegation: Option<String>,
    pub outcome: Option<String>,
    pub stewards: Option<String>,
    pub incident_involving: Option<String>,
    pub penalty_points: Option<String>,
    pub fine: Option<String>,
    pub time_penalty: Option<String>,
    pub grid_penalty: Option<String>,
    pub notes: Option<String>,
}

/// Grid penalty attached to a penalty record.
///
/// The source column mixes numbers ("5") with phrases ("Pit Lane",
/// "Back of starting grid").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridPenalty {
    /// Number of grid places lost.
    Positions(i64),
    /// Start from the pit lane.
    PitLane,
    /// Any other free text kept verbatim (trimmed).
    Text(String),
}

impl fmt::Display for GridPenalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridPenalty::Positions(n) => write!(f, "{}", n),
            GridPenalty::PitLane => write!(f, "Pit Lane"),
            GridPenalty::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Serialize for GridPenalty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GridPenalty::Positions(n) => serializer.serialize_i64(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// One penalty incident after type coercion, canonicalization and list
/// derivation.
///
/// Records are created once by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Name of the sheet (season) the row came from.
    pub sheet: String,
    pub year: Option<i64>,
    pub round: Option<i64>,
    pub race: Option<String>,
    pub session: Option<String>,
    pub driver: Option<String>,
    pub team: Option<String>,
    /// Canonical allegation.
    pub allegation: Option<String>,
    /// Trimmed allegation text as it appeared in the sheet.
    pub raw_allegation: Option<String>,
    /// Canonical outcome tokens joined with ", ".
    pub outcome: Option<String>,
    /// Canonical outcome tokens in source order, duplicates kept.
    pub outcome_list: Vec<String>,
    /// Trimmed stewards cell as it appeared in the sheet.
    pub stewards: Option<String>,
    /// Canonical steward names in source order.
    pub stewards_list: Vec<String>,
    pub incident_involving: Option<String>,
    pub penalty_points: Option<i64>,
    pub fine: Option<f64>,
    /// Time penalty in seconds.
    pub time_penalty: Option<f64>,
    pub grid_penalty: Option<GridPenalty>,
    pub notes: Option<String>,
}

impl NormalizedRecord {
    /// Empty record for the given sheet; used as a base by test fixtures
    /// and builders.
    pub fn empty(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            year: None,
            round: None,
            race: None,
            session: None,
            driver: None,
            team: None,
            allegation: None,
            raw_allegation: None,
            outcome: None,
            outcome_list: Vec::new(),
            stewards: None,
            stewards_list: Vec::new(),
            incident_involving: None,
            penalty_points: None,
            fine: None,
            time_penalty: None,
            grid_penalty: None,
            notes: None,
        }
    }

    pub fn has_steward(&self, steward: &str) -> bool {
        self.stewards_list.iter().any(|s| s == steward)
    }

    pub fn has_outcome(&self, outcome: &str) -> bool {
        self.outcome_list.iter().any(|o| o == outcome)
    }
}
