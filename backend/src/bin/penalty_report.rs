//! Penalty report binary
//!
//! Loads the configured season workbook and prints JSON reports.
//!
//! # Usage
//!
//! ```bash
//! # Headline figures for 2023 and 2024
//! cargo run --bin penalty-report -- overview --years 2023,2024
//!
//! # Average penalty points per steward (min 5 incidents)
//! cargo run --bin penalty-report -- stewards
//!
//! # Severity and team-distribution analysis for one steward
//! cargo run --bin penalty-report -- bias --steward "Garry Connelly" --pretty
//!
//! # Team penalties per season
//! cargo run --bin penalty-report -- trend --column team --names "Red Bull,McLaren"
//! ```
//!
//! # Environment Variables
//!
//! - `PENALTIES_DATA_PATH`: Workbook directory (overrides `penalties.toml`)
//! - `RUST_LOG`: Log level (default: warn)

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use penalty_insights::api::{self, Dimension, EntityColumn, FilterCriteria, PenaltiesConfig};
use penalty_insights::store;

#[derive(Debug, Parser)]
#[command(name = "penalty-report", about = "Query F1 stewarding penalty records")]
struct Cli {
    /// Configuration file (default: penalties.toml in the standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Workbook directory holding one `<season>.csv` per sheet
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Headline totals for the filtered records
    Overview {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Average penalty points per steward
    Stewards {
        /// Minimum incidents for a steward to be listed
        #[arg(long)]
        min_incidents: Option<usize>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Severity z-score and team-distribution test for one steward
    Bias {
        #[arg(long)]
        steward: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Penalties per year for the named drivers, teams or stewards
    Trend {
        #[arg(long, value_enum)]
        column: TrendColumn,
        #[arg(long, value_delimiter = ',', required = true)]
        names: Vec<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Values available for each filter
    Options {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TrendColumn {
    Driver,
    Team,
    Steward,
}

impl From<TrendColumn> for EntityColumn {
    fn from(column: TrendColumn) -> Self {
        match column {
            TrendColumn::Driver => EntityColumn::Driver,
            TrendColumn::Team => EntityColumn::Team,
            TrendColumn::Steward => EntityColumn::Steward,
        }
    }
}

/// Filter selections, comma-separated per dimension.
#[derive(Debug, Default, Args)]
struct FilterArgs {
    #[arg(long, value_delimiter = ',')]
    years: Vec<i64>,
    #[arg(long, value_delimiter = ',')]
    races: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    sessions: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    drivers: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    teams: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    allegations: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    outcomes: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    stewards: Vec<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_years(self.years.iter().copied())
            .with(Dimension::Race, &self.races)
            .with(Dimension::Session, &self.sessions)
            .with(Dimension::Driver, &self.drivers)
            .with(Dimension::Team, &self.teams)
            .with(Dimension::Allegation, &self.allegations)
            .with(Dimension::Outcome, &self.outcomes)
            .with(Dimension::Steward, &self.stewards)
    }
}

fn resolve_config(cli: &Cli) -> anyhow::Result<PenaltiesConfig> {
    let mut config = match &cli.config {
        Some(path) => PenaltiesConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_env_overrides(),
        None => PenaltiesConfig::resolve().context("Failed to resolve configuration")?,
    };
    if let Some(data) = &cli.data {
        config.source.path = data.clone();
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", output);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    info!("Loading penalties from {}", config.source.path.display());

    let dataset = store::init_dataset(&config).with_context(|| {
        format!(
            "Failed to load penalty workbook from {}",
            config.source.path.display()
        )
    })?;
    info!(
        "Dataset ready: {} records, sheets {:?}",
        dataset.len(),
        dataset.sheets
    );

    match &cli.command {
        Command::Overview { filters } => {
            let records = api::filter(dataset.records(), &filters.criteria());
            print_json(&api::overview(&records), cli.pretty)
        }
        Command::Stewards {
            min_incidents,
            filters,
        } => {
            let records = api::filter(dataset.records(), &filters.criteria());
            let threshold = min_incidents.unwrap_or(config.analysis.display_min_incidents);
            print_json(&api::steward_averages(&records, threshold), cli.pretty)
        }
        Command::Bias { steward, filters } => {
            let records = api::filter(dataset.records(), &filters.criteria());
            let report = api::analyze_steward(&records, steward, &config.analysis);
            print_json(&report, cli.pretty)
        }
        Command::Trend {
            column,
            names,
            filters,
        } => {
            let records = api::filter(dataset.records(), &filters.criteria());
            let trend = api::entity_yearly_counts(&records, (*column).into(), names);
            print_json(&trend, cli.pretty)
        }
        Command::Options { filters } => {
            let criteria = filters.criteria();
            let records = api::filter(dataset.records(), &criteria);
            let options = json!({
                "years": api::distinct_years(&records),
                "races": api::races_for_years(&records, &criteria.years()),
                "sessions": api::distinct_values(&records, Dimension::Session),
                "drivers": api::distinct_values(&records, Dimension::Driver),
                "teams": api::distinct_values(&records, Dimension::Team),
                "allegations": api::distinct_values(&records, Dimension::Allegation),
                "outcomes": api::distinct_outcomes(&records),
                "stewards": api::distinct_stewards(&records),
            });
            print_json(&options, cli.pretty)
        }
    }
}
