#[cfg(test)]
mod tests {
    use crate::error::LoadError;
    use crate::models::{GridPenalty, RawRow};
    use crate::parsing::{RawSheet, REQUIRED_COLUMNS};
    use crate::preprocessing::normalizer::{normalize, normalize_row, normalize_with_summary};

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn sainz_row() -> RawRow {
        RawRow {
            year: cell("2023"),
            round: cell("4"),
            race: cell(" Azerbaijan "),
            session: cell("Race"),
            driver: cell("Carlos Sainz Jnr"),
            team: cell("Scuderia Ferrari"),
            allegation: cell("Causing A Collision"),
            outcome: cell("Time Penalty"),
            stewards: cell("Garry Connelly, Loic Bacqulaine"),
            penalty_points: cell("2"),
            ..Default::default()
        }
    }

    fn sheet_with_rows(name: &str, rows: &[&[&str]]) -> RawSheet {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.push("Stewards".to_string());
        let rows = rows
            .iter()
            .map(|row| {
                let mut cells = vec![String::new(); headers.len()];
                for (i, value) in row.iter().enumerate() {
                    cells[i] = value.to_string();
                }
                cells
            })
            .collect();
        RawSheet::new(name, headers, rows)
    }

    #[test]
    fn test_end_to_end_row() {
        let record = normalize_row("2023", &sainz_row()).unwrap();

        assert_eq!(record.sheet, "2023");
        assert_eq!(record.year, Some(2023));
        assert_eq!(record.round, Some(4));
        assert_eq!(record.race.as_deref(), Some("Azerbaijan"));
        assert_eq!(record.driver.as_deref(), Some("Carlos Sainz"));
        assert_eq!(record.team.as_deref(), Some("Ferrari"));
        assert_eq!(record.allegation.as_deref(), Some("Causing a Collision"));
        assert_eq!(record.raw_allegation.as_deref(), Some("Causing A Collision"));
        assert_eq!(record.outcome.as_deref(), Some("Time Penalty"));
        assert_eq!(record.outcome_list, vec!["Time Penalty"]);
        assert_eq!(
            record.stewards_list,
            vec!["Garry Connelly", "Loic Bacquelaine"]
        );
        assert_eq!(record.penalty_points, Some(2));
        assert_eq!(record.fine, None);
        assert_eq!(record.grid_penalty, None);
    }

    #[test]
    fn test_unparseable_numbers_are_absent() {
        let raw = RawRow {
            year: cell("twenty"),
            round: cell("1.5"),
            penalty_points: cell("-"),
            fine: cell("EUR 5000"),
            time_penalty: cell("5s"),
            ..sainz_row()
        };
        let record = normalize_row("2023", &raw).unwrap();

        assert_eq!(record.year, None);
        assert_eq!(record.round, None);
        assert_eq!(record.penalty_points, None);
        assert_eq!(record.fine, None);
        assert_eq!(record.time_penalty, None);
    }

    #[test]
    fn test_outcome_tokens_canonicalized_and_rejoined() {
        let raw = RawRow {
            outcome: cell("time penalty,penalty points , Time Penalty"),
            ..sainz_row()
        };
        let record = normalize_row("2023", &raw).unwrap();

        assert_eq!(
            record.outcome.as_deref(),
            Some("Time Penalty, Penalty Points, Time Penalty")
        );
        assert_eq!(
            record.outcome_list,
            vec!["Time Penalty", "Penalty Points", "Time Penalty"]
        );
    }

    #[test]
    fn test_grid_penalty_from_outcome() {
        let back = RawRow {
            outcome: cell("Start from back of grid"),
            ..sainz_row()
        };
        let record = normalize_row("2023", &back).unwrap();
        assert_eq!(record.grid_penalty, Some(GridPenalty::Positions(19)));
        assert_eq!(record.outcome_list, vec!["Grid Penalty"]);

        let pit = RawRow {
            outcome: cell("start from pit lane"),
            ..sainz_row()
        };
        let record = normalize_row("2023", &pit).unwrap();
        assert_eq!(record.grid_penalty, Some(GridPenalty::PitLane));
    }

    #[test]
    fn test_absent_stewards_and_outcome_give_empty_lists() {
        let raw = RawRow {
            stewards: None,
            outcome: cell(" , "),
            ..sainz_row()
        };
        let record = normalize_row("2023", &raw).unwrap();

        assert!(record.stewards_list.is_empty());
        assert!(record.outcome_list.is_empty());
        assert_eq!(record.outcome, None);
    }

    #[test]
    fn test_unmapped_allegation_keeps_casing() {
        let raw = RawRow {
            allegation: cell("  Ignoring Blue Flags Twice "),
            ..sainz_row()
        };
        let record = normalize_row("2023", &raw).unwrap();
        assert_eq!(record.allegation.as_deref(), Some("Ignoring Blue Flags Twice"));
        assert_eq!(record.raw_allegation.as_deref(), Some("Ignoring Blue Flags Twice"));
    }

    #[test]
    fn test_incident_involving_uses_driver_aliases() {
        let raw = RawRow {
            incident_involving: cell("Alexander Albon"),
            ..sainz_row()
        };
        let record = normalize_row("2023", &raw).unwrap();
        assert_eq!(record.incident_involving.as_deref(), Some("Alex Albon"));
    }

    #[test]
    fn test_blocklisted_driver_is_dropped() {
        let raw = RawRow {
            driver: cell("Mclaren Formula 1 Team"),
            ..sainz_row()
        };
        assert!(normalize_row("2023", &raw).is_none());
    }

    #[test]
    fn test_normalize_concatenates_in_sheet_order() {
        let sheets = vec![
            sheet_with_rows("2020", &[&["2020", "1", "Austria", "Race", "Lewis Hamilton"]]),
            sheet_with_rows(
                "2021",
                &[
                    &["2021", "1", "Bahrain", "Race", "Max Verstappen"],
                    &["2021", "2", "Imola", "Race", "McLaren Formula 1 Team"],
                    &["2021", "3", "Portugal", "Race", "Lando Norris"],
                ],
            ),
        ];

        let (records, summary) = normalize_with_summary(&sheets).unwrap();
        let drivers: Vec<_> = records.iter().map(|r| r.driver.as_deref().unwrap()).collect();
        assert_eq!(drivers, vec!["Lewis Hamilton", "Max Verstappen", "Lando Norris"]);
        assert_eq!(summary.sheets, 2);
        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_kept, 3);
        assert_eq!(summary.rows_dropped, 1);
    }

    #[test]
    fn test_normalize_fails_on_any_malformed_sheet() {
        let good = sheet_with_rows("2020", &[&["2020", "1", "Austria", "Race", "Lewis Hamilton"]]);
        let bad = RawSheet::new(
            "2021",
            vec!["Year".to_string(), "Driver".to_string()],
            vec![vec!["2021".to_string(), "Max Verstappen".to_string()]],
        );

        match normalize(&[good, bad]) {
            Err(LoadError::MissingColumn { sheet, column }) => {
                assert_eq!(sheet, "2021");
                assert_eq!(column, "Round");
            }
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_normalization_is_idempotent_on_canonical_text() {
        let first = normalize_row("2023", &sainz_row()).unwrap();
        let again = RawRow {
            driver: first.driver.clone(),
            team: first.team.clone(),
            allegation: first.allegation.clone(),
            outcome: first.outcome.clone(),
            stewards: Some(first.stewards_list.join(", ")),
            ..sainz_row()
        };
        let second = normalize_row("2023", &again).unwrap();

        assert_eq!(second.driver, first.driver);
        assert_eq!(second.team, first.team);
        assert_eq!(second.allegation, first.allegation);
        assert_eq!(second.outcome_list, first.outcome_list);
        assert_eq!(second.stewards_list, first.stewards_list);
    }
}
