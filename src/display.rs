use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::Result;
use crate::schedule::{Day, GeneratedSchedule, Shift};

/// Formats the names in one cell, or a placeholder when nobody is assigned
pub fn format_cell(names: &[String]) -> String {
    if names.is_empty() {
        "No assignments".to_string()
    } else {
        names.join(", ")
    }
}

/// Renders the weekly schedule followed by any coverage shortfalls
pub fn render_schedule(outcome: &GeneratedSchedule) -> String {
    let mut out = String::from("Weekly Schedule:\n");
    out.push_str(&"=".repeat(80));
    out.push('\n');

    for day in Day::ALL {
        out.push_str(&format!("\n{}:\n{}\n", day, "-".repeat(40)));
        for shift in Shift::ALL {
            let names = outcome.schedule.cell(day, shift);
            out.push_str(&format!("{}: {}\n", shift, format_cell(names)));
        }
    }

    if !outcome.shortfalls.is_empty() {
        out.push_str(&format!("\nCoverage shortfalls ({}):\n", outcome.shortfalls.len()));
        for shortfall in &outcome.shortfalls {
            out.push_str(&format!(
                "  - {} {}: {} more employee(s) needed\n",
                shortfall.day, shortfall.shift, shortfall.missing
            ));
        }
    }

    out
}

/// Prints the schedule in a readable format
pub fn print_schedule(outcome: &GeneratedSchedule) {
    println!("\n{}", render_schedule(outcome));
}

/// Writes the rendered schedule to a text file, stamped with the generation time
pub fn write_schedule_to_file<P: AsRef<Path>>(outcome: &GeneratedSchedule, filename: P) -> Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "Generated {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    write!(file, "{}", render_schedule(outcome))?;

    Ok(())
}
