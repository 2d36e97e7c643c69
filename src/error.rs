use thiserror::Error;

use crate::schedule::Day;

/// Validation failures raised while importing a preference CSV.
///
/// Only the first problem found in a file is ever reported. Rows are counted
/// from 1 with the header as row 1, columns from 1 with `Name` as column 1.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File {0} does not exist.")]
    FileNotFound(String),

    #[error("The input CSV file cannot be used because it is empty. Please provide a file with employee schedule data.")]
    Empty,

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Invalid header format.\nExpected 8 columns (Name + 7 days of the week), but found {found} columns.\nPlease ensure your CSV file has the following columns: Name, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday.")]
    HeaderColumnCount { found: usize },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Invalid first column name.\nExpected 'Name' as the first column, but found '{found}'.\nPlease ensure your CSV file starts with a 'Name' column.")]
    FirstColumn { found: String },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Invalid column {column}.\nExpected '{expected}', but found '{found}'.\nPlease ensure your CSV file has the following columns in order: Name, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday.")]
    DayColumn {
        column: usize,
        expected: Day,
        found: String,
    },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Invalid number of columns in row {row}.\nExpected 8 columns, but found {found} columns.\nPlease ensure each row has values for Name and all 7 days of the week.")]
    RowColumnCount { row: usize, found: usize },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Empty employee name in row {row}.\nPlease ensure all employees have a name.")]
    EmptyName { row: usize },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: Invalid shift code in row {row}, column {column}.\nFound '{found}', but only M (Morning), A (Afternoon), E (Evening), or N (No Shift) are allowed.")]
    InvalidShiftCode {
        row: usize,
        column: usize,
        found: String,
    },

    #[error("The input CSV file cannot be used because it does not follow the required format.\nFirst error encountered: {0}\nPlease ensure your file is a valid CSV file with the correct format.")]
    Unreadable(String),
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The engine tried to commit past the weekly cap or onto a day that is
    /// already taken. Never expected from a correct run.
    #[error("Capacity exceeded: {name} cannot take another shift on {day}")]
    CapacityExceeded { name: String, day: Day },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
