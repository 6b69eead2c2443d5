use log::{debug, info};
use serde::Serialize;

use crate::aliases::{
    canonical_allegation, canonical_driver, canonical_outcome_list, canonical_steward_list,
    canonical_team, is_invalid_driver,
};
use crate::error::LoadResult;
use crate::models::{NormalizedRecord, RawRow};
use crate::parsing::RawSheet;
use crate::preprocessing::coercion::{clean_text, derive_grid_penalty, parse_float, parse_integer};

/// Row counts produced by a normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationSummary {
    pub sheets: usize,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows whose driver is a known data-entry mistake.
    pub rows_dropped: usize,
}

/// Normalize a single raw row.
///
/// Returns `None` when the row's driver is on the invalid-driver blocklist.
pub fn normalize_row(sheet: &str, raw: &RawRow) -> Option<NormalizedRecord> {
    let text = |cell: &Option<String>| clean_text(cell.as_deref());

    let outcome_text = text(&raw.outcome);
    let grid_penalty = derive_grid_penalty(outcome_text.as_deref(), raw.grid_penalty.as_deref());

    let driver = text(&raw.driver).map(|d| canonical_driver(&d));
    let team = text(&raw.team).map(|t| canonical_team(&t));
    let incident_involving = text(&raw.incident_involving).map(|d| canonical_driver(&d));

    let raw_allegation = text(&raw.allegation);
    let allegation = raw_allegation.as_deref().map(canonical_allegation);

    let outcome_list = outcome_text
        .as_deref()
        .map(canonical_outcome_list)
        .unwrap_or_default();
    let outcome = if outcome_list.is_empty() {
        None
    } else {
        Some(outcome_list.join(", "))
    };

    if driver.as_deref().is_some_and(is_invalid_driver) {
        return None;
    }

    let stewards = text(&raw.stewards);
    let stewards_list = stewards
        .as_deref()
        .map(canonical_steward_list)
        .unwrap_or_default();

    Some(NormalizedRecord {
        sheet: sheet.to_string(),
        year: parse_integer(raw.year.as_deref()),
        round: parse_integer(raw.round.as_deref()),
        race: text(&raw.race),
        session: text(&raw.session),
        driver,
        team,
        allegation,
        raw_allegation,
        outcome,
        outcome_list,
        stewards,
        stewards_list,
        incident_involving,
        penalty_points: parse_integer(raw.penalty_points.as_deref()),
        fine: parse_float(raw.fine.as_deref()),
        time_penalty: parse_float(raw.time_penalty.as_deref()),
        grid_penalty,
        notes: text(&raw.notes),
    })
}

/// Normalize all sheets, concatenated in the given (season) order.
///
/// Every sheet's schema is checked before any row is normalized, so a
/// missing column fails the whole load.
pub fn normalize(sheets: &[RawSheet]) -> LoadResult<Vec<NormalizedRecord>> {
    normalize_with_summary(sheets).map(|(records, _)| records)
}

/// Same as [`normalize`], also reporting row counts.
pub fn normalize_with_summary(
    sheets: &[RawSheet],
) -> LoadResult<(Vec<NormalizedRecord>, NormalizationSummary)> {
    let raw_sheets = sheets
        .iter()
        .map(|sheet| sheet.raw_rows().map(|rows| (sheet.name(), rows)))
        .collect::<LoadResult<Vec<_>>>()?;

    let mut summary = NormalizationSummary {
        sheets: raw_sheets.len(),
        ..Default::default()
    };
    let mut records = Vec::new();

    for (name, rows) in &raw_sheets {
        let before = records.len();
        records.extend(rows.iter().filter_map(|row| normalize_row(name, row)));
        let kept = records.len() - before;

        debug!(
            "Normalized sheet '{}': {} rows read, {} kept",
            name,
            rows.len(),
            kept
        );
        summary.rows_read += rows.len();
        summary.rows_kept += kept;
    }
    summary.rows_dropped = summary.rows_read - summary.rows_kept;

    if summary.rows_dropped > 0 {
        info!(
            "Dropped {} rows with invalid driver entries",
            summary.rows_dropped
        );
    }

    Ok((records, summary))
}
