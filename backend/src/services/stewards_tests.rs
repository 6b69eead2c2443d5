#[cfg(test)]
mod tests {
    use crate::config::AnalysisConfig;
    use crate::models::NormalizedRecord;
    use crate::services::stewards::{
        analyze_steward, severity_score, steward_averages, steward_team_breakdown,
        team_distribution_difference, team_distribution_test, DistributionBias, SeverityBand,
    };

    fn create_test_record(
        team: &str,
        driver: &str,
        points: Option<i64>,
        stewards: &[&str],
    ) -> NormalizedRecord {
        let mut record = NormalizedRecord::empty("2023");
        record.year = Some(2023);
        record.team = Some(team.to_string());
        record.driver = Some(driver.to_string());
        record.penalty_points = points;
        record.stewards_list = stewards.iter().map(|s| s.to_string()).collect();
        record
    }

    fn config(severity_min_incidents: usize) -> AnalysisConfig {
        AnalysisConfig {
            severity_min_incidents,
            ..AnalysisConfig::default()
        }
    }

    /// Stewards averaging A = 3, B = C = 1 points over two incidents each.
    fn graded_population() -> Vec<NormalizedRecord> {
        let mut records = Vec::new();
        for _ in 0..2 {
            records.push(create_test_record("Ferrari", "Carlos Sainz", Some(3), &["A"]));
            records.push(create_test_record("McLaren", "Lando Norris", Some(1), &["B"]));
            records.push(create_test_record("Alpine", "Esteban Ocon", Some(1), &["C"]));
        }
        records
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(SeverityBand::from_z_score(1.51), SeverityBand::NotablyHarsh);
        assert_eq!(SeverityBand::from_z_score(1.5), SeverityBand::SlightlyHarsh);
        assert_eq!(SeverityBand::from_z_score(0.5), SeverityBand::Average);
        assert_eq!(SeverityBand::from_z_score(-0.5), SeverityBand::Average);
        assert_eq!(SeverityBand::from_z_score(-1.5), SeverityBand::SlightlyLenient);
        assert_eq!(SeverityBand::from_z_score(-1.51), SeverityBand::NotablyLenient);

        assert_eq!(DistributionBias::from_p_value(0.009), DistributionBias::SignificantlyUnusual);
        assert_eq!(DistributionBias::from_p_value(0.01), DistributionBias::Unusual);
        assert_eq!(DistributionBias::from_p_value(0.05), DistributionBias::Normal);
        assert_eq!(DistributionBias::Unusual.label(), "Unusual Team Distribution");
    }

    #[test]
    fn test_averages_divide_by_all_incidents() {
        let records = vec![
            create_test_record("Ferrari", "Carlos Sainz", Some(2), &["S"]),
            create_test_record("Ferrari", "Carlos Sainz", None, &["S"]),
            create_test_record("Ferrari", "Carlos Sainz", Some(4), &["T"]),
        ];
        let averages = steward_averages(&records, 1);

        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].steward, "T");
        assert_eq!(averages[0].avg_penalty_points, 4.0);
        assert_eq!(averages[1].steward, "S");
        assert_eq!(averages[1].incidents, 2);
        assert_eq!(averages[1].avg_penalty_points, 1.0);
    }

    #[test]
    fn test_averages_apply_threshold() {
        let records = graded_population();
        assert_eq!(steward_averages(&records, 2).len(), 3);
        assert!(steward_averages(&records, 3).is_empty());
    }

    #[test]
    fn test_severity_uses_sample_std() {
        let records = graded_population();

        // mean 5/3, sample std sqrt(4/3)
        let std = (4.0_f64 / 3.0).sqrt();
        let a = severity_score(&records, "A", 2);
        assert_eq!(a.population_size, 3);
        assert!((a.population_mean - 5.0 / 3.0).abs() < 1e-9);
        assert!((a.z_score - (4.0 / 3.0) / std).abs() < 1e-9);
        assert_eq!(a.band, SeverityBand::SlightlyHarsh);

        let b = severity_score(&records, "B", 2);
        assert!((b.z_score + (2.0 / 3.0) / std).abs() < 1e-9);
        assert_eq!(b.band, SeverityBand::SlightlyLenient);
    }

    #[test]
    fn test_population_below_two_gives_zero() {
        let records: Vec<NormalizedRecord> = (0..10)
            .map(|_| create_test_record("Ferrari", "Carlos Sainz", Some(3), &["A"]))
            .collect();
        let score = severity_score(&records, "A", 10);

        assert_eq!(score.population_size, 1);
        assert_eq!(score.z_score, 0.0);
        assert_eq!(score.band, SeverityBand::Average);
    }

    #[test]
    fn test_zero_spread_gives_zero() {
        let records = vec![
            create_test_record("Ferrari", "Carlos Sainz", Some(1), &["A"]),
            create_test_record("McLaren", "Lando Norris", Some(1), &["B"]),
        ];
        assert_eq!(severity_score(&records, "A", 1).z_score, 0.0);
    }

    #[test]
    fn test_non_qualifying_steward_gives_zero() {
        let mut records = graded_population();
        records.push(create_test_record("Ferrari", "Carlos Sainz", Some(10), &["Rookie"]));
        let score = severity_score(&records, "Rookie", 2);

        assert_eq!(score.steward_average, None);
        assert_eq!(score.z_score, 0.0);
        assert_eq!(score.band, SeverityBand::Average);
    }

    fn split_field() -> Vec<NormalizedRecord> {
        let mut records = Vec::new();
        for _ in 0..4 {
            records.push(create_test_record("Ferrari", "Charles Leclerc", Some(1), &["X"]));
        }
        for _ in 0..4 {
            records.push(create_test_record("McLaren", "Oscar Piastri", None, &["Y"]));
        }
        for _ in 0..2 {
            records.push(create_test_record("Ferrari", "Carlos Sainz", None, &["Y"]));
            records.push(create_test_record("McLaren", "Lando Norris", None, &["Y"]));
        }
        records
    }

    #[test]
    fn test_team_distribution_chi_square() {
        // X judged 4 Ferrari incidents against an even split:
        // expected 2/2, observed 4/0, statistic 4 with 1 dof.
        let test = team_distribution_test(&split_field(), "X");

        assert_eq!(test.teams.len(), 2);
        assert!((test.chi_square.unwrap() - 4.0).abs() < 1e-9);
        assert!((test.p_value.unwrap() - 0.0455).abs() < 1e-3);
        assert_eq!(test.bias, DistributionBias::Unusual);
    }

    #[test]
    fn test_single_team_is_not_applicable() {
        let records = vec![
            create_test_record("Ferrari", "Carlos Sainz", Some(1), &["A"]),
            create_test_record("Ferrari", "Charles Leclerc", Some(1), &["B"]),
        ];
        let test = team_distribution_test(&records, "A");

        assert_eq!(test.bias, DistributionBias::NotApplicable);
        assert_eq!(test.chi_square, None);
        assert_eq!(test.p_value, None);
    }

    #[test]
    fn test_analyze_steward_report() {
        let records = split_field();
        let report = analyze_steward(&records, "X", &config(2));

        assert_eq!(report.steward, "X");
        assert_eq!(report.incident_count, 4);
        assert_eq!(report.avg_penalty_points, 1.0);
        assert_eq!(report.population_size, 2);
        assert_eq!(report.distribution, DistributionBias::Unusual);
        assert!(report.chi_square.is_some());
    }

    #[test]
    fn test_report_counts_panels_and_diff_from_mean() {
        let mut records = graded_population();
        for record in records.iter_mut() {
            record.race = Some("Bahrain".to_string());
        }
        let mut next_season = create_test_record("Ferrari", "Carlos Sainz", Some(3), &["A"]);
        next_season.year = Some(2024);
        next_season.race = Some("Bahrain".to_string());
        records.push(next_season);

        // Twice at Bahrain 2023, once at Bahrain 2024.
        let report = analyze_steward(&records, "A", &config(2));
        assert_eq!(report.incident_count, 3);
        assert_eq!(report.panels, 2);

        // Population averages 3, 1, 1.
        assert!((report.population_mean - 5.0 / 3.0).abs() < 1e-9);
        assert!((report.diff_pct - 80.0).abs() < 1e-9);

        let lenient = analyze_steward(&records, "B", &config(2));
        assert!((lenient.diff_pct + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_diff_is_zero_when_population_mean_is_zero() {
        let records = vec![
            create_test_record("Ferrari", "Carlos Sainz", None, &["A"]),
            create_test_record("McLaren", "Lando Norris", None, &["B"]),
        ];
        let report = analyze_steward(&records, "A", &config(1));
        assert_eq!(report.population_mean, 0.0);
        assert_eq!(report.diff_pct, 0.0);
        assert_eq!(report.panels, 1);
    }

    #[test]
    fn test_report_serializes_missing_stats_as_na() {
        let records = vec![create_test_record("Ferrari", "Carlos Sainz", Some(1), &["A"])];
        let report = analyze_steward(&records, "A", &AnalysisConfig::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["chi_square"], "N/A");
        assert_eq!(json["p_value"], "N/A");
        assert_eq!(json["severity"], "Average");
        assert_eq!(json["distribution"], "Not Applicable");
        assert!(report.to_string().contains("Chi-square: N/A"));
    }

    #[test]
    fn test_unknown_steward_report_is_empty() {
        let report = analyze_steward(&split_field(), "Nobody", &config(2));
        assert_eq!(report.incident_count, 0);
        assert_eq!(report.avg_penalty_points, 0.0);
        assert_eq!(report.z_score, 0.0);
        assert_eq!(report.distribution, DistributionBias::NotApplicable);
    }

    #[test]
    fn test_steward_team_breakdown_orders_by_team_total() {
        let rows = steward_team_breakdown(&split_field(), "Y");

        assert_eq!(rows[0].team, "McLaren");
        assert_eq!(rows[0].driver, "Oscar Piastri");
        assert_eq!(rows[0].count, 4);
        assert_eq!(rows[1].driver, "Lando Norris");
        assert_eq!(rows[2].team, "Ferrari");
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_team_distribution_difference() {
        let rows = team_distribution_difference(&split_field(), "X");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team, "McLaren");
        assert_eq!(rows[0].difference_pct, -100.0);
        assert_eq!(rows[1].team, "Ferrari");
        assert_eq!(rows[1].difference_pct, 100.0);

        assert!(team_distribution_difference(&split_field(), "Nobody").is_empty());
    }
}
