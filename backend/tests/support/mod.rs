#![allow(dead_code)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use tempfile::TempDir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const HEADER: &str = "Year,Round,Race,Session,Driver,Team,Allegation,Outcome,Stewards,Incident involving,Penalty Points,Fine,Time Penalty (in seconds),Grid Penalty,Notes";

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// CSV text for a sheet with the full header and the given data lines.
pub fn sheet_csv(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

pub fn write_sheet(dir: &Path, name: &str, rows: &[&str]) {
    fs::write(dir.join(format!("{}.csv", name)), sheet_csv(rows)).expect("write sheet");
}

pub fn seasons(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A small two-season workbook with alias variants, a blocklisted row and
/// an out-of-range sheet.
pub fn sample_workbook() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write_sheet(
        dir.path(),
        "2023",
        &[
            "2023,1,Bahrain,Race,Carlos Sainz Jnr,Scuderia Ferrari,Causing A Collision,\"time penalty, penalty points\",\"Garry Connelly, Loic Bacqulaine\",Lando Norris,2,,5,,",
            "2023,1,Bahrain,Race,Lando Norris,McLaren,Impeding,Grid Penalty,\"Garry Connelly, Matheiu Remmerie\",,1,,,3,",
            "2023,2,Jeddah,Qualifying,Max Verstappen,Red Bull Racing,Power Unit Elements,Start from back of grid,Garry Connelly,,,,,,New engine",
            "2023,2,Jeddah,Race,McLaren Formula 1 Team,McLaren,Unsafe Release,Fine,Garry Connelly,,,5000,,,",
        ],
    );
    write_sheet(
        dir.path(),
        "2024",
        &[
            "2024,1,Bahrain,Race,Max Verstappen,Red Bull,Track Limits,Warning,\"Mathieu Remmerie, Garry Connelly\",,,,,,",
            "2024,3,Imola,Race,Alexander Albon,Williams,Unsafe Release,\"start from pit lane, fine\",Loic Bacquelaine,,,2000,,Pit Lane,",
        ],
    );
    write_sheet(
        dir.path(),
        "2019",
        &["2019,1,Melbourne,Race,Someone,Team,Speeding in the Pit Lane,Fine,,,,100,,,"],
    );
    dir
}
