use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::error::{ErrorContext, LoadError, LoadResult};
use crate::models::RawRow;

/// Sheet column headers.
pub mod columns {
    pub const YEAR: &str = "Year";
    pub const ROUND: &str = "Round";
    pub const RACE: &str = "Race";
    pub const SESSION: &str = "Session";
    pub const DRIVER: &str = "Driver";
    pub const TEAM: &str = "Team";
    pub const ALLEGATION: &str = "Allegation";
    pub const OUTCOME: &str = "Outcome";
    pub const STEWARDS: &str = "Stewards";
    pub const INCIDENT_INVOLVING: &str = "Incident involving";
    pub const PENALTY_POINTS: &str = "Penalty Points";
    pub const FINE: &str = "Fine";
    pub const TIME_PENALTY: &str = "Time Penalty (in seconds)";
    pub const GRID_PENALTY: &str = "Grid Penalty";
    pub const NOTES: &str = "Notes";
}

/// Columns every season sheet must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::YEAR,
    columns::ROUND,
    columns::RACE,
    columns::SESSION,
    columns::DRIVER,
    columns::TEAM,
    columns::ALLEGATION,
    columns::OUTCOME,
    columns::INCIDENT_INVOLVING,
    columns::PENALTY_POINTS,
    columns::FINE,
    columns::TIME_PENALTY,
    columns::GRID_PENALTY,
];

/// Columns read when present; a sheet without them has all-absent cells.
pub const OPTIONAL_COLUMNS: &[&str] = &[columns::STEWARDS, columns::NOTES];

/// One season sheet as untyped text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(|h| h.trim().to_string()).collect(),
            rows,
        }
    }

    /// Read a sheet from CSV text with a header row.
    ///
    /// Cells that are not valid UTF-8 (e.g. a Windows-1252 export) are
    /// decoded lossily instead of failing the sheet.
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> LoadResult<Self> {
        let name = name.into();
        let ctx = || ErrorContext::new("read_sheet").with_sheet(name.clone());

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut lossy_cells = 0usize;
        let headers: Vec<String> = rdr
            .byte_headers()
            .map_err(|e| LoadError::csv(e.to_string(), ctx()))?
            .iter()
            .map(|cell| decode_cell(cell, &mut lossy_cells))
            .collect();

        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            let record = record.map_err(|e| LoadError::csv(e.to_string(), ctx()))?;
            rows.push(
                record
                    .iter()
                    .map(|cell| decode_cell(cell, &mut lossy_cells))
                    .collect(),
            );
        }

        if lossy_cells > 0 {
            warn!(
                "Sheet '{}' has {} cells that are not valid UTF-8; invalid bytes were replaced",
                name, lossy_cells
            );
        }

        Ok(Self::new(name, headers, rows))
    }

    /// Read a sheet from a CSV file.
    pub fn from_path(name: impl Into<String>, path: &Path) -> LoadResult<Self> {
        let name = name.into();
        let file = File::open(path).map_err(|e| {
            LoadError::io(
                format!("Failed to open sheet file: {}", e),
                ErrorContext::new("read_sheet")
                    .with_sheet(name.clone())
                    .with_path(path.display()),
            )
        })?;
        Self::from_reader(name, file)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn cells(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Check the required columns, naming the first one missing.
    pub fn validate(&self) -> LoadResult<ColumnIndex> {
        let positions: HashMap<&str, usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        for column in REQUIRED_COLUMNS {
            if !positions.contains_key(column) {
                return Err(LoadError::missing_column(&self.name, *column));
            }
        }

        let position = |column: &str| positions.get(column).copied();
        Ok(ColumnIndex {
            year: position(columns::YEAR),
            round: position(columns::ROUND),
            race: position(columns::RACE),
            session: position(columns::SESSION),
            driver: position(columns::DRIVER),
            team: position(columns::TEAM),
            allegation: position(columns::ALLEGATION),
            outcome: position(columns::OUTCOME),
            stewards: position(columns::STEWARDS),
            incident_involving: position(columns::INCIDENT_INVOLVING),
            penalty_points: position(columns::PENALTY_POINTS),
            fine: position(columns::FINE),
            time_penalty: position(columns::TIME_PENALTY),
            grid_penalty: position(columns::GRID_PENALTY),
            notes: position(columns::NOTES),
        })
    }

    /// Validate the schema and extract every row.
    pub fn raw_rows(&self) -> LoadResult<Vec<RawRow>> {
        let index = self.validate()?;
        Ok(self.rows.iter().map(|row| index.extract(row)).collect())
    }
}

fn decode_cell(bytes: &[u8], lossy_cells: &mut usize) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            *lossy_cells += 1;
            text
        }
    }
}

/// Column positions resolved for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    year: Option<usize>,
    round: Option<usize>,
    race: Option<usize>,
    session: Option<usize>,
    driver: Option<usize>,
    team: Option<usize>,
    allegation: Option<usize>,
    outcome: Option<usize>,
    stewards: Option<usize>,
    incident_involving: Option<usize>,
    penalty_points: Option<usize>,
    fine: Option<usize>,
    time_penalty: Option<usize>,
    grid_penalty: Option<usize>,
    notes: Option<usize>,
}

impl ColumnIndex {
    fn extract(&self, row: &[String]) -> RawRow {
        // Short rows (flexible CSV) read as blank cells.
        let cell = |pos: Option<usize>| {
            pos.and_then(|i| row.get(i))
                .filter(|v| !v.trim().is_empty())
                .cloned()
        };
        RawRow {
            year: cell(self.year),
            round: cell(self.round),
            race: cell(self.race),
            session: cell(self.session),
            driver: cell(self.driver),
            team: cell(self.team),
            allegation: cell(self.allegation),
            outcome: cell(self.outcome),
            stewards: cell(self.stewards),
            incident_involving: cell(self.incident_involving),
            penalty_points: cell(self.penalty_points),
            fine: cell(self.fine),
            time_penalty: cell(self.time_penalty),
            grid_penalty: cell(self.grid_penalty),
            notes: cell(self.notes),
        }
    }
}

/// Ordered collection of season sheets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<RawSheet>,
}

impl Workbook {
    /// Keep only allow-listed sheets, ordered as the allow-list orders them.
    pub fn from_sheets(sheets: Vec<RawSheet>, allow_list: &[String]) -> Self {
        let mut by_name: HashMap<String, RawSheet> = HashMap::new();
        for sheet in sheets {
            if allow_list.iter().any(|s| s == sheet.name()) {
                by_name.insert(sheet.name.clone(), sheet);
            } else {
                debug!("Ignoring sheet '{}' outside the season allow-list", sheet.name());
            }
        }

        let sheets = allow_list
            .iter()
            .filter_map(|name| by_name.remove(name))
            .collect();
        Self { sheets }
    }

    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Read `<dir>/<sheet>.csv` for every allow-listed sheet that exists.
///
/// Files for sheets outside the allow-list are never opened. Fails when no
/// allow-listed sheet is present.
pub fn read_workbook_dir(dir: &Path, allow_list: &[String]) -> LoadResult<Workbook> {
    if !dir.is_dir() {
        return Err(LoadError::io(
            "Workbook directory does not exist",
            ErrorContext::new("read_workbook").with_path(dir.display()),
        ));
    }

    report_ignored_entries(dir, allow_list)?;

    let mut sheets = Vec::new();
    for name in allow_list {
        let path = dir.join(format!("{}.csv", name));
        if !path.is_file() {
            debug!("Sheet '{}' not present at {}", name, path.display());
            continue;
        }
        let sheet = RawSheet::from_path(name.clone(), &path)?;
        debug!("Read sheet '{}' with {} rows", name, sheet.row_count());
        sheets.push(sheet);
    }

    if sheets.is_empty() {
        return Err(LoadError::no_sheets(
            format!("None of the sheets {:?} were found", allow_list),
            ErrorContext::new("read_workbook").with_path(dir.display()),
        ));
    }

    Ok(Workbook { sheets })
}

fn report_ignored_entries(dir: &Path, allow_list: &[String]) -> LoadResult<()> {
    let entries = fs::read_dir(dir).map_err(|e| {
        LoadError::io(
            format!("Failed to list workbook directory: {}", e),
            ErrorContext::new("read_workbook").with_path(dir.display()),
        )
    })?;

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();

        if !is_csv {
            warn!("Skipping non-CSV entry {}", path.display());
        } else if !allow_list.iter().any(|s| s == stem) {
            debug!("Ignoring sheet '{}' outside the season allow-list", stem);
        }
    }
    Ok(())
}
