use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::info;

use crate::error::Result;
use crate::parser::NAME_HEADER;
use crate::schedule::{Day, Employee, EmployeeStore, ShiftCode};

fn write_table<W, F>(store: &EmployeeStore, out: W, code_for: F) -> Result<()>
where
    W: Write,
    F: Fn(&Employee, Day) -> ShiftCode,
{
    let mut wtr = Writer::from_writer(out);

    let mut header = vec![NAME_HEADER];
    header.extend(Day::ALL.iter().map(|day| day.name()));
    wtr.write_record(&header)?;

    for employee in store.iter() {
        let mut row = vec![employee.name.as_str()];
        row.extend(Day::ALL.iter().map(|&day| code_for(employee, day).as_str()));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes each employee's preferences in the import format.
///
/// Only the first listed preference per day is written; days without one
/// get `N`. Reading the output back yields the same preference set.
pub fn write_preferences<W: Write>(store: &EmployeeStore, out: W) -> Result<()> {
    write_table(store, out, |employee, day| {
        ShiftCode::from(employee.preferred_shifts(day).first().copied())
    })
}

/// Writes each employee's assigned shift per day, `N` when off
pub fn write_assignments<W: Write>(store: &EmployeeStore, out: W) -> Result<()> {
    write_table(store, out, |employee, day| {
        ShiftCode::from(employee.assigned_shift(day))
    })
}

pub fn save_preferences<P: AsRef<Path>>(store: &EmployeeStore, csv_path: P) -> Result<()> {
    let file = File::create(csv_path.as_ref())?;
    write_preferences(store, file)?;
    info!(path = %csv_path.as_ref().display(), "saved preferences");
    Ok(())
}

pub fn save_assignments<P: AsRef<Path>>(store: &EmployeeStore, csv_path: P) -> Result<()> {
    let file = File::create(csv_path.as_ref())?;
    write_assignments(store, file)?;
    info!(path = %csv_path.as_ref().display(), "saved assignments");
    Ok(())
}
