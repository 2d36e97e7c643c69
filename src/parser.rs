use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ImportError, Result};
use crate::schedule::{Day, EmployeeStore, Shift, ShiftCode};

/// Number of columns in the tabular format: Name + 7 days
pub const COLUMN_COUNT: usize = 8;

pub const NAME_HEADER: &str = "Name";

/// One validated employee row. Days marked `N` are left out of `preferences`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub name: String,
    pub preferences: BTreeMap<Day, Shift>,
}

impl PreferenceRecord {
    /// Builds a record from one shift code per day, Monday first
    pub fn from_codes(name: &str, codes: &[ShiftCode; 7]) -> Self {
        let preferences = Day::ALL
            .iter()
            .zip(codes.iter())
            .filter_map(|(&day, code)| code.shift().map(|shift| (day, shift)))
            .collect();

        PreferenceRecord {
            name: name.to_string(),
            preferences,
        }
    }

    /// Preference map in the shape the store expects (one shift per day)
    pub fn preference_lists(&self) -> BTreeMap<Day, Vec<Shift>> {
        self.preferences
            .iter()
            .map(|(&day, &shift)| (day, vec![shift]))
            .collect()
    }
}

/// Checks the header row: exactly `Name` followed by the seven days in order
fn validate_header(header: &StringRecord) -> std::result::Result<(), ImportError> {
    if header.len() != COLUMN_COUNT {
        return Err(ImportError::HeaderColumnCount {
            found: header.len(),
        });
    }

    let first = header.get(0).unwrap_or("");
    if first != NAME_HEADER {
        return Err(ImportError::FirstColumn {
            found: first.to_string(),
        });
    }

    for (i, day) in Day::ALL.iter().enumerate() {
        let found = header.get(i + 1).unwrap_or("missing");
        if found != day.name() {
            return Err(ImportError::DayColumn {
                column: i + 2,
                expected: *day,
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates one data row and turns it into a record
fn parse_row(row: &StringRecord, row_num: usize) -> std::result::Result<PreferenceRecord, ImportError> {
    if row.len() != COLUMN_COUNT {
        return Err(ImportError::RowColumnCount {
            row: row_num,
            found: row.len(),
        });
    }

    let name = row.get(0).unwrap_or("").trim();
    if name.is_empty() {
        return Err(ImportError::EmptyName { row: row_num });
    }

    let mut codes = [ShiftCode::NoShift; 7];
    for (i, code) in codes.iter_mut().enumerate() {
        let raw = row.get(i + 1).unwrap_or("");
        *code = ShiftCode::from_code(raw).ok_or_else(|| ImportError::InvalidShiftCode {
            row: row_num,
            column: i + 2,
            found: raw.to_string(),
        })?;
    }

    Ok(PreferenceRecord::from_codes(name, &codes))
}

/// Row number (header = 1) of the first line that holds nothing at all.
///
/// The csv reader drops such lines silently, so they are found on the raw
/// text. Quoted fields may span lines; rows are counted by line breaks
/// outside quotes.
fn first_blank_row(text: &str) -> Option<usize> {
    let mut row = 1;
    let mut in_quotes = false;
    let mut row_empty = true;

    for ch in text.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                row_empty = false;
            }
            '\n' if !in_quotes => {
                if row_empty {
                    return Some(row);
                }
                row += 1;
                row_empty = true;
            }
            '\r' if !in_quotes => {}
            _ => row_empty = false,
        }
    }

    None
}

/// Reads and validates preference CSV data.
///
/// Stops at the first problem and returns it; on error no record is returned
/// at all, so a half-valid file never reaches the store. A blank line counts
/// as a row with no columns.
pub fn read_preferences<R: Read>(mut source: R) -> std::result::Result<Vec<PreferenceRecord>, ImportError> {
    let mut text = String::new();
    source
        .read_to_string(&mut text)
        .map_err(|e| ImportError::Unreadable(e.to_string()))?;

    let blank_row = first_blank_row(&text);
    if blank_row == Some(1) {
        return Err(ImportError::HeaderColumnCount { found: 0 });
    }

    // The header is validated by hand, and ragged rows are reported by us
    // rather than by the csv reader
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = reader.records();

    let header = match rows.next() {
        Some(result) => result.map_err(|e| ImportError::Unreadable(e.to_string()))?,
        None => return Err(ImportError::Empty),
    };
    validate_header(&header)?;

    let mut records = Vec::new();
    // Row 1 is the header. Rows before the first blank line keep their file
    // numbering because the reader has skipped nothing yet.
    for (row_num, result) in (2..).zip(rows) {
        if blank_row == Some(row_num) {
            return Err(ImportError::RowColumnCount { row: row_num, found: 0 });
        }
        let row = result.map_err(|e| ImportError::Unreadable(e.to_string()))?;
        records.push(parse_row(&row, row_num)?);
    }

    // Blank lines after the last row
    if let Some(row) = blank_row {
        return Err(ImportError::RowColumnCount { row, found: 0 });
    }

    Ok(records)
}

/// Loads preferences from a CSV file on disk
pub fn load_preferences<P: AsRef<Path>>(csv_path: P) -> std::result::Result<Vec<PreferenceRecord>, ImportError> {
    let csv_path = csv_path.as_ref();
    if !csv_path.exists() {
        return Err(ImportError::FileNotFound(csv_path.display().to_string()));
    }

    let file = File::open(csv_path).map_err(|e| ImportError::Unreadable(e.to_string()))?;
    let records = read_preferences(file)?;

    info!(path = %csv_path.display(), employees = records.len(), "loaded preferences");
    Ok(records)
}

/// Appends every record to the store, in file order
pub fn populate_store(store: &mut EmployeeStore, records: &[PreferenceRecord]) -> Result<usize> {
    for record in records {
        store.add(&record.name, record.preference_lists())?;
    }
    Ok(records.len())
}
