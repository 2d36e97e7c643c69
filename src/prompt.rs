use std::io::{BufRead, Write};

use crate::error::{Result, SchedulerError};
use crate::parser::PreferenceRecord;
use crate::schedule::{Day, EmployeeStore, ShiftCode};

/// Prints `question` and reads one trimmed line. `None` on end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for one employee's name and a shift code for each day.
///
/// A blank name is rejected with `InvalidInput`. Invalid codes are re-asked
/// until the user enters M, A, E or N. Returns `None` if input runs out.
pub fn prompt_employee<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<PreferenceRecord>> {
    let name = match ask(input, output, "\nEnter employee name: ")? {
        Some(name) => name,
        None => return Ok(None),
    };
    if name.is_empty() {
        return Err(SchedulerError::InvalidInput(
            "Name cannot be empty.".to_string(),
        ));
    }

    writeln!(
        output,
        "\nEnter shift preferences for each day (M=Morning, A=Afternoon, E=Evening, N=No Shift):"
    )?;

    let mut codes = [ShiftCode::NoShift; 7];
    for (code, day) in codes.iter_mut().zip(Day::ALL) {
        *code = loop {
            let answer = match ask(input, output, &format!("{} (M/A/E/N): ", day))? {
                Some(answer) => answer,
                None => return Ok(None),
            };
            match ShiftCode::from_code(&answer) {
                Some(parsed) => break parsed,
                None => writeln!(output, "Invalid input. Please enter M, A, E, or N.")?,
            }
        };
    }

    Ok(Some(PreferenceRecord::from_codes(&name, &codes)))
}

/// Asks a yes/no question; anything but `y` counts as no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    let answer = ask(input, output, &format!("{} (y/n): ", question))?;
    Ok(matches!(answer.as_deref(), Some("y") | Some("Y")))
}

/// Reads employees until the user declines to add another or input runs out.
///
/// A blank name prints the error and goes straight back to the name prompt.
pub fn enter_employees<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<EmployeeStore> {
    let mut store = EmployeeStore::new();

    loop {
        match prompt_employee(input, output) {
            Ok(Some(record)) => {
                store.add(&record.name, record.preference_lists())?;
            }
            Ok(None) => break,
            Err(SchedulerError::InvalidInput(msg)) => {
                writeln!(output, "Error: {}", msg)?;
                continue;
            }
            Err(e) => return Err(e),
        }
        if !confirm(input, output, "\nAdd another employee?")? {
            break;
        }
    }

    Ok(store)
}
