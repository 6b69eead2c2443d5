//! Content fingerprint of a loaded workbook.

use sha2::{Digest, Sha256};

use crate::parsing::RawSheet;

const FIELD_SEP: &[u8] = b"\x1f";
const ROW_SEP: &[u8] = b"\n";
const SHEET_SEP: &[u8] = b"\x1e";

/// Calculate the SHA-256 checksum of a set of sheets.
///
/// Covers sheet names, headers and every cell in load order, so reordering
/// sheets changes the checksum.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(sheets: &[RawSheet]) -> String {
    let mut hasher = Sha256::new();
    for sheet in sheets {
        hasher.update(sheet.name().as_bytes());
        hasher.update(ROW_SEP);
        update_row(&mut hasher, sheet.headers());
        for row in sheet.cells() {
            update_row(&mut hasher, row);
        }
        hasher.update(SHEET_SEP);
    }
    hex::encode(hasher.finalize())
}

fn update_row(hasher: &mut Sha256, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            hasher.update(FIELD_SEP);
        }
        hasher.update(cell.as_bytes());
    }
    hasher.update(ROW_SEP);
}
