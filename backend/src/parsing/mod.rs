//! Readers for the season workbook.
//!
//! The workbook is a set of sheets, one per season, each exported as a CSV
//! file named after the sheet (`2023.csv`). Only allow-listed sheets are read
//! and their column schema is checked before any row is used.
//!
//! # Example
//!
//! ```no_run
//! use penalty_insights::parsing::read_workbook_dir;
//! use std::path::Path;
//!
//! let seasons = vec!["2023".to_string(), "2024".to_string()];
//! let workbook = read_workbook_dir(Path::new("data/penalties"), &seasons)
//!     .expect("Failed to read workbook");
//! println!("{} sheets", workbook.sheets().len());
//! ```

pub mod workbook;


pub use workbook::{
    columns, read_workbook_dir, ColumnIndex, RawSheet, Workbook, OPTIONAL_COLUMNS,
    REQUIRED_COLUMNS,
};
