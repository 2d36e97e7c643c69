use tracing::debug;

use super::employee::EmployeeStore;
use super::types::{Day, WeeklySchedule, MIN_STAFF_PER_SHIFT};
use crate::error::Result;

/// Preference pass: gives every employee their preferred shifts while the
/// cell still has room.
///
/// Employees are visited in store order and days in calendar order, so earlier
/// employees win ties. For each day the preferred shifts are tried in listed
/// order and the first one below minimum headcount is taken. Returns the
/// number of assignments made.
pub fn assign_preferred_shifts(
    store: &mut EmployeeStore,
    schedule: &mut WeeklySchedule,
) -> Result<usize> {
    let mut assigned = 0;

    for id in 0..store.len() {
        for day in Day::ALL {
            // Snapshot the choice first so the store can be borrowed mutably below
            let choice = match store.get(id) {
                Some(employee) if employee.is_available(day) => employee
                    .preferred_shifts(day)
                    .iter()
                    .copied()
                    .find(|&shift| schedule.headcount(day, shift) < MIN_STAFF_PER_SHIFT)
                    .map(|shift| (shift, employee.name.clone())),
                _ => None,
            };

            if let Some((shift, name)) = choice {
                store.commit(id, day, shift)?;
                schedule.push(day, shift, &name);
                assigned += 1;
                debug!(employee = %name, %day, %shift, "assigned preferred shift");
            }
        }
    }

    Ok(assigned)
}
