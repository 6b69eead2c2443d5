//! Cell coercion helpers.
//!
//! A cell that cannot be read as the expected type is absent, never zero.

use crate::models::{GridPenalty, BACK_OF_GRID_POSITIONS};

/// Trimmed text, or `None` for blank cells.
pub fn clean_text(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer value of a cell. Integral decimals ("2.0") are accepted; anything
/// else is absent.
pub fn parse_integer(cell: Option<&str>) -> Option<i64> {
    let text = cell?.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

/// Finite floating point value of a cell.
pub fn parse_float(cell: Option<&str>) -> Option<f64> {
    cell?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Grid penalty as written in the Grid Penalty column, before any
/// outcome-derived rule.
pub fn parse_grid_cell(cell: &str) -> GridPenalty {
    let text = cell.trim();
    match parse_integer(Some(text)) {
        Some(positions) => GridPenalty::Positions(positions),
        None => GridPenalty::Text(text.to_string()),
    }
}

/// Resolve the grid penalty of a row.
///
/// Outcome phrases are checked first. A recognised phrase in the original
/// Grid Penalty cell then wins over the outcome-derived value; any other cell
/// content does not override it.
pub fn derive_grid_penalty(outcome: Option<&str>, grid_cell: Option<&str>) -> Option<GridPenalty> {
    let grid_cell = grid_cell.map(str::trim).filter(|s| !s.is_empty());
    let mut grid = grid_cell.map(parse_grid_cell);

    if let Some(outcome) = outcome {
        let outcome = outcome.to_lowercase();
        if outcome.contains("start from back of grid") {
            grid = Some(GridPenalty::Positions(BACK_OF_GRID_POSITIONS));
        } else if outcome.contains("start from pit lane") {
            grid = Some(GridPenalty::PitLane);
        }
    }

    if let Some(cell) = grid_cell {
        match cell.to_lowercase().as_str() {
            "pit lane" => grid = Some(GridPenalty::PitLane),
            "back of starting grid" => {
                grid = Some(GridPenalty::Positions(BACK_OF_GRID_POSITIONS))
            }
            _ => {}
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer(Some("2023")), Some(2023));
        assert_eq!(parse_integer(Some(" 3 ")), Some(3));
        assert_eq!(parse_integer(Some("2.0")), Some(2));
        assert_eq!(parse_integer(Some("2.5")), None);
        assert_eq!(parse_integer(Some("n/a")), None);
        assert_eq!(parse_integer(Some("")), None);
        assert_eq!(parse_integer(None), None);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float(Some("5000")), Some(5000.0));
        assert_eq!(parse_float(Some("2.5")), Some(2.5));
        assert_eq!(parse_float(Some("NaN")), None);
        assert_eq!(parse_float(Some("inf")), None);
        assert_eq!(parse_float(Some("EUR 500")), None);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(Some("  Imola ")), Some("Imola".to_string()));
        assert_eq!(clean_text(Some("   ")), None);
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn test_outcome_back_of_grid() {
        assert_eq!(
            derive_grid_penalty(Some("Start from back of grid"), None),
            Some(GridPenalty::Positions(19))
        );
    }

    #[test]
    fn test_outcome_pit_lane() {
        assert_eq!(
            derive_grid_penalty(Some("Reprimand, start from pit lane"), None),
            Some(GridPenalty::PitLane)
        );
    }

    #[test]
    fn test_back_of_grid_checked_before_pit_lane() {
        assert_eq!(
            derive_grid_penalty(Some("start from back of grid, start from pit lane"), None),
            Some(GridPenalty::Positions(19))
        );
    }

    #[test]
    fn test_existing_cell_phrases_are_normalized() {
        assert_eq!(
            derive_grid_penalty(None, Some("PIT LANE")),
            Some(GridPenalty::PitLane)
        );
        assert_eq!(
            derive_grid_penalty(Some("Grid Penalty"), Some("Back of starting grid")),
            Some(GridPenalty::Positions(19))
        );
    }

    #[test]
    fn test_cell_phrase_overrides_outcome_only_when_triggered() {
        assert_eq!(
            derive_grid_penalty(Some("Start from back of grid"), Some("pit lane")),
            Some(GridPenalty::PitLane)
        );
        assert_eq!(
            derive_grid_penalty(Some("Start from back of grid"), Some("5")),
            Some(GridPenalty::Positions(19))
        );
        assert_eq!(
            derive_grid_penalty(Some("start from pit lane"), Some("10 places")),
            Some(GridPenalty::PitLane)
        );
    }

    #[test]
    fn test_plain_cells_pass_through() {
        assert_eq!(
            derive_grid_penalty(Some("Grid Penalty"), Some("3")),
            Some(GridPenalty::Positions(3))
        );
        assert_eq!(
            derive_grid_penalty(None, Some("5 places")),
            Some(GridPenalty::Text("5 places".into()))
        );
        assert_eq!(derive_grid_penalty(Some("Fine"), None), None);
    }
}
