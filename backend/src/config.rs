//! Configuration file support.
//!
//! Settings are read from a TOML file (`penalties.toml`) and may be
//! overridden by environment variables. Every field has a default, so a
//! missing file is not an error for [`PenaltiesConfig::resolve`].

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

/// Environment variable overriding `source.path`.
pub const DATA_PATH_ENV: &str = "PENALTIES_DATA_PATH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PenaltiesConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Where the season workbook lives and which sheets to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Season sheets to load, in season order.
    #[serde(default = "default_sheets")]
    pub sheets: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            sheets: default_sheets(),
        }
    }
}

/// Population thresholds for steward statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum incidents for a steward to count in the severity population.
    #[serde(default = "default_severity_min_incidents")]
    pub severity_min_incidents: usize,
    /// Minimum incidents for a steward to appear in average-points listings.
    #[serde(default = "default_display_min_incidents")]
    pub display_min_incidents: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            severity_min_incidents: default_severity_min_incidents(),
            display_min_incidents: default_display_min_incidents(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/penalties")
}

fn default_sheets() -> Vec<String> {
    (2020..=2025).map(|year| year.to_string()).collect()
}

fn default_severity_min_incidents() -> usize {
    10
}

fn default_display_min_incidents() -> usize {
    5
}

impl PenaltiesConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PenaltiesConfig)` if successful
    /// * `Err(LoadError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            LoadError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: PenaltiesConfig = toml::from_str(&content).map_err(|e| {
            LoadError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `penalties.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, LoadError> {
        match default_location() {
            Some(path) => Self::from_file(path),
            None => Err(LoadError::configuration(
                "No penalties.toml found in standard locations",
            )),
        }
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = env::var(DATA_PATH_ENV) {
            if !path.trim().is_empty() {
                self.source.path = PathBuf::from(path.trim());
            }
        }
        self
    }

    /// Configuration from the default file if one exists, otherwise
    /// defaults, with environment overrides applied.
    ///
    /// A config file that exists but cannot be parsed is an error.
    pub fn resolve() -> Result<Self, LoadError> {
        let config = match default_location() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }
}

fn default_location() -> Option<PathBuf> {
    [
        PathBuf::from("penalties.toml"),
        PathBuf::from("backend/penalties.toml"),
        PathBuf::from("../penalties.toml"),
    ]
    .into_iter()
    .find(|path| path.exists())
}
