//! Alias tables for free-text identifiers.
//!
//! Drivers, teams and stewards are matched exactly (case-sensitive) on the
//! trimmed value. Allegations and outcomes are matched case-insensitively.
//! A miss is never an error: the trimmed input passes through unchanged.
//!
//! # Example
//!
//! ```
//! use penalty_insights::aliases::{canonical_steward, canonical_team, resolve, STEWARDS};
//!
//! assert_eq!(canonical_team("Red Bull Racing"), "Red Bull");
//! assert_eq!(resolve(&STEWARDS, " Matheiu Remmerie "), "Mathieu Remmerie");
//! assert_eq!(canonical_steward("Garry Connelly"), "Garry Connelly");
//! ```

mod tables;

use once_cell::sync::Lazy;
use std::collections::HashMap;

use tables::{
    ALLEGATION_ALIASES, DRIVER_ALIASES, INVALID_DRIVERS, OUTCOME_ALIASES, STEWARD_ALIASES,
    TEAM_ALIASES,
};

/// How an [`AliasTable`] compares lookup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    CaseInsensitive,
}

/// A static variant -> canonical mapping.
#[derive(Debug)]
pub struct AliasTable {
    name: &'static str,
    mode: MatchMode,
    entries: HashMap<String, &'static str>,
}

impl AliasTable {
    fn build(name: &'static str, mode: MatchMode, pairs: &[(&'static str, &'static str)]) -> Self {
        let entries = pairs
            .iter()
            .map(|(variant, canonical)| {
                let key = match mode {
                    MatchMode::Exact => variant.to_string(),
                    MatchMode::CaseInsensitive => variant.to_lowercase(),
                };
                (key, *canonical)
            })
            .collect();
        Self {
            name,
            mode,
            entries,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical form for an already-trimmed key, if the table knows it.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        match self.mode {
            MatchMode::Exact => self.entries.get(key).copied(),
            MatchMode::CaseInsensitive => self.entries.get(&key.to_lowercase()).copied(),
        }
    }

    /// Iterate over `(lookup key, canonical)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

pub static DRIVERS: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::build("driver", MatchMode::Exact, DRIVER_ALIASES));

pub static TEAMS: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::build("team", MatchMode::Exact, TEAM_ALIASES));

pub static STEWARDS: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::build("steward", MatchMode::Exact, STEWARD_ALIASES));

pub static ALLEGATIONS: Lazy<AliasTable> = Lazy::new(|| {
    AliasTable::build(
        "allegation",
        MatchMode::CaseInsensitive,
        ALLEGATION_ALIASES,
    )
});

pub static OUTCOMES: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::build("outcome", MatchMode::CaseInsensitive, OUTCOME_ALIASES));

/// Apply an alias table or pass the trimmed key through. Total over all inputs.
pub fn resolve(table: &AliasTable, key: &str) -> String {
    let trimmed = key.trim();
    match table.get(trimmed) {
        Some(canonical) => canonical.to_string(),
        None => trimmed.to_string(),
    }
}

pub fn canonical_driver(name: &str) -> String {
    resolve(&DRIVERS, name)
}

pub fn canonical_team(name: &str) -> String {
    resolve(&TEAMS, name)
}

pub fn canonical_steward(name: &str) -> String {
    resolve(&STEWARDS, name)
}

/// Canonical allegation; unmapped text keeps its original casing.
pub fn canonical_allegation(allegation: &str) -> String {
    resolve(&ALLEGATIONS, allegation)
}

/// Canonical form of a single outcome token.
pub fn canonical_outcome(token: &str) -> String {
    resolve(&OUTCOMES, token)
}

/// Split a comma-joined field into trimmed, non-empty tokens.
pub fn split_list(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Canonical outcome tokens of a comma-joined outcome cell, in source order.
pub fn canonical_outcome_list(outcome: &str) -> Vec<String> {
    split_list(outcome).map(canonical_outcome).collect()
}

/// Canonical steward names of a comma-joined stewards cell, in source order.
pub fn canonical_steward_list(stewards: &str) -> Vec<String> {
    split_list(stewards).map(canonical_steward).collect()
}

/// Whether a (canonical) driver value is a known data-entry mistake.
pub fn is_invalid_driver(driver: &str) -> bool {
    INVALID_DRIVERS.contains(&driver)
}
