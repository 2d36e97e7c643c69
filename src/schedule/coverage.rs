use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::employee::EmployeeStore;
use super::types::{Day, Shift, Shortfall, WeeklySchedule, MIN_STAFF_PER_SHIFT};
use crate::error::Result;

/// Coverage repair pass: tops up every cell below minimum headcount.
///
/// Cells are visited day by day, Morning to Evening. While a cell is short, one
/// employee is drawn uniformly at random from everyone still free that day and
/// under the weekly cap, regardless of preference. A cell that runs out of
/// candidates is reported as a shortfall and left as is.
pub fn fill_coverage_gaps<R: Rng + ?Sized>(
    store: &mut EmployeeStore,
    schedule: &mut WeeklySchedule,
    rng: &mut R,
) -> Result<Vec<Shortfall>> {
    let mut shortfalls = Vec::new();

    for day in Day::ALL {
        for shift in Shift::ALL {
            while schedule.headcount(day, shift) < MIN_STAFF_PER_SHIFT {
                // Anyone already on this shift has `day` assigned, so is filtered out too
                let candidates = store.eligible_any_shift(day);

                let Some(&id) = candidates.choose(rng) else {
                    let missing = MIN_STAFF_PER_SHIFT - schedule.headcount(day, shift);
                    warn!(%day, %shift, missing, "cannot meet minimum coverage");
                    shortfalls.push(Shortfall { day, shift, missing });
                    break;
                };

                store.commit(id, day, shift)?;
                if let Some(employee) = store.get(id) {
                    debug!(employee = %employee.name, %day, %shift, "filled coverage gap");
                    schedule.push(day, shift, &employee.name);
                }
            }
        }
    }

    Ok(shortfalls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    #[test]
    fn test_no_employees_reports_every_cell() {
        let mut store = EmployeeStore::new();
        let mut schedule = WeeklySchedule::new();
        let mut rng = StdRng::seed_from_u64(7);

        let shortfalls = fill_coverage_gaps(&mut store, &mut schedule, &mut rng).unwrap();

        assert_eq!(shortfalls.len(), 21);
        assert!(shortfalls.iter().all(|s| s.missing == MIN_STAFF_PER_SHIFT));
        assert_eq!(shortfalls[0].day, Day::Monday);
        assert_eq!(shortfalls[0].shift, Shift::Morning);
    }

    #[test]
    fn test_partial_fill_reports_remaining_gap() {
        let mut store = EmployeeStore::new();
        store.add("Solo", BTreeMap::new()).unwrap();
        let mut schedule = WeeklySchedule::new();
        let mut rng = StdRng::seed_from_u64(7);

        let shortfalls = fill_coverage_gaps(&mut store, &mut schedule, &mut rng).unwrap();

        // Solo covers half of Monday..Friday Morning, then hits the cap
        for day in &Day::ALL[..5] {
            assert_eq!(schedule.cell(*day, Shift::Morning), ["Solo"]);
        }
        let monday_morning = shortfalls
            .iter()
            .find(|s| s.day == Day::Monday && s.shift == Shift::Morning)
            .unwrap();
        assert_eq!(monday_morning.missing, 1);
        let saturday_morning = shortfalls
            .iter()
            .find(|s| s.day == Day::Saturday && s.shift == Shift::Morning)
            .unwrap();
        assert_eq!(saturday_morning.missing, 2);
        assert_eq!(store.get(0).unwrap().days_worked, 5);
    }

    #[test]
    fn test_six_employees_cover_five_days() {
        let mut store = EmployeeStore::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            store.add(name, BTreeMap::new()).unwrap();
        }
        let mut schedule = WeeklySchedule::new();
        let mut rng = StdRng::seed_from_u64(11);

        let shortfalls = fill_coverage_gaps(&mut store, &mut schedule, &mut rng).unwrap();

        // 6 employees x 5 days = 30 shifts for 42 slots, so later days run dry
        let filled: usize = schedule.iter().map(|(_, _, names)| names.len()).sum();
        assert_eq!(filled, 30);
        assert!(schedule.iter().all(|(_, _, names)| names.len() <= MIN_STAFF_PER_SHIFT));
        for day in &Day::ALL[..5] {
            for shift in Shift::ALL {
                assert_eq!(schedule.headcount(*day, shift), MIN_STAFF_PER_SHIFT);
            }
        }
        let missing: usize = shortfalls.iter().map(|s| s.missing).sum();
        assert_eq!(missing, 12);
    }
}
