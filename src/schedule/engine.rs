use rand::Rng;
use tracing::info;

use super::coverage::fill_coverage_gaps;
use super::employee::EmployeeStore;
use super::preference::assign_preferred_shifts;
use super::types::{GeneratedSchedule, WeeklySchedule};
use crate::error::Result;

/// Builds the weekly schedule for everyone in `store`.
///
/// Runs the preference pass and then the coverage repair pass, which is the
/// only consumer of `rng`. Assignment state left over from an earlier run is
/// cleared first, so the store always matches the returned schedule. Given the
/// same store contents and the same seeded `rng`, the result is identical.
pub fn generate<R: Rng + ?Sized>(
    store: &mut EmployeeStore,
    rng: &mut R,
) -> Result<GeneratedSchedule> {
    store.clear_assignments();
    let mut schedule = WeeklySchedule::new();

    let preferred = assign_preferred_shifts(store, &mut schedule)?;
    info!(employees = store.len(), preferred, "preference pass complete");

    let shortfalls = fill_coverage_gaps(store, &mut schedule, rng)?;
    info!(shortfalls = shortfalls.len(), "coverage pass complete");

    Ok(GeneratedSchedule {
        schedule,
        shortfalls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{
        Day, Shift, Shortfall, MAX_DAYS_PER_WEEK, MIN_STAFF_PER_SHIFT,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn every_day(shift: Shift) -> BTreeMap<Day, Vec<Shift>> {
        Day::ALL.iter().map(|&d| (d, vec![shift])).collect()
    }

    fn assert_invariants(store: &EmployeeStore, outcome: &GeneratedSchedule) {
        for employee in store.iter() {
            assert!(employee.days_worked <= MAX_DAYS_PER_WEEK);
            assert_eq!(employee.days_worked, employee.assignments.len());
        }
        for day in Day::ALL {
            let mut seen = Vec::new();
            for shift in Shift::ALL {
                for name in outcome.schedule.cell(day, shift) {
                    assert!(!seen.contains(name), "{} double-booked on {}", name, day);
                    seen.push(name.clone());
                }
                if outcome.shortfall_for(day, shift).is_none() {
                    assert!(outcome.schedule.headcount(day, shift) >= MIN_STAFF_PER_SHIFT);
                }
            }
        }
    }

    #[test]
    fn test_two_morning_people_leave_later_shifts_short() {
        let mut store = EmployeeStore::new();
        store.add("Ann", every_day(Shift::Morning)).unwrap();
        store.add("Ben", every_day(Shift::Morning)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = generate(&mut store, &mut rng).unwrap();
        assert_invariants(&store, &outcome);

        // Both reach the cap on Friday, so the weekend is empty
        for day in &Day::ALL[..5] {
            assert_eq!(outcome.schedule.cell(*day, Shift::Morning), ["Ann", "Ben"]);
            for shift in [Shift::Afternoon, Shift::Evening] {
                assert_eq!(
                    outcome.shortfall_for(*day, shift),
                    Some(&Shortfall { day: *day, shift, missing: 2 })
                );
            }
        }
        for day in [Day::Saturday, Day::Sunday] {
            for shift in Shift::ALL {
                assert_eq!(outcome.schedule.headcount(day, shift), 0);
                assert!(outcome.shortfall_for(day, shift).is_some());
            }
        }
        assert_eq!(outcome.shortfalls.len(), 5 * 2 + 2 * 3);
    }

    #[test]
    fn test_disjoint_preferences_cover_every_cell_exactly() {
        // Pairs share the same cells; cell index c goes to pair c % 5, which
        // keeps every pair on distinct days and at most 5 days each
        let mut pair_prefs: Vec<BTreeMap<Day, Vec<Shift>>> = vec![BTreeMap::new(); 5];
        for c in 0..21 {
            let day = Day::ALL[c / 3];
            let shift = Shift::ALL[c % 3];
            pair_prefs[c % 5].insert(day, vec![shift]);
        }
        let mut store = EmployeeStore::new();
        for (pair, prefs) in pair_prefs.iter().enumerate() {
            store.add(&format!("P{}a", pair), prefs.clone()).unwrap();
            store.add(&format!("P{}b", pair), prefs.clone()).unwrap();
        }
        assert_eq!(store.len(), 10);
        let mut rng = StdRng::seed_from_u64(99);

        let outcome = generate(&mut store, &mut rng).unwrap();
        assert_invariants(&store, &outcome);

        assert!(outcome.is_fully_covered());
        for (day, shift, names) in outcome.schedule.iter() {
            assert_eq!(names.len(), MIN_STAFF_PER_SHIFT, "{} {}", day, shift);
        }
        // Everyone got exactly what they asked for
        for employee in store.iter() {
            for (day, shifts) in &employee.preferences {
                assert_eq!(employee.assigned_shift(*day), Some(shifts[0]));
            }
        }
    }

    #[test]
    fn test_full_week_preference_is_capped() {
        let mut store = EmployeeStore::new();
        store.add("Kim", every_day(Shift::Evening)).unwrap();
        for name in ["L", "M", "N", "O", "P", "Q", "R", "S"] {
            store.add(name, BTreeMap::new()).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = generate(&mut store, &mut rng).unwrap();
        assert_invariants(&store, &outcome);

        let kim = store.get(0).unwrap();
        assert_eq!(kim.days_worked, MAX_DAYS_PER_WEEK);
        for day in &Day::ALL[..5] {
            assert_eq!(kim.assigned_shift(*day), Some(Shift::Evening));
        }
        assert_eq!(kim.assigned_shift(Day::Saturday), None);
        assert_eq!(kim.assigned_shift(Day::Sunday), None);
        assert!(!outcome.schedule.cell(Day::Saturday, Shift::Evening).contains(&kim.name));
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let build = || {
            let mut store = EmployeeStore::new();
            store.add("A", every_day(Shift::Morning)).unwrap();
            for name in ["B", "C", "D", "E", "F", "G", "H"] {
                store.add(name, BTreeMap::new()).unwrap();
            }
            store
        };

        let mut first_store = build();
        let first = generate(&mut first_store, &mut StdRng::seed_from_u64(2024)).unwrap();
        let mut second_store = build();
        let second = generate(&mut second_store, &mut StdRng::seed_from_u64(2024)).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_invariants(&first_store, &first);
    }

    #[test]
    fn test_seed_only_changes_repair_choices() {
        let build = || {
            let mut store = EmployeeStore::new();
            store.add("A", every_day(Shift::Morning)).unwrap();
            store.add("B", every_day(Shift::Afternoon)).unwrap();
            for name in ["C", "D", "E", "F", "G", "H", "I", "J"] {
                store.add(name, BTreeMap::new()).unwrap();
            }
            store
        };

        for seed in [1, 2, 3] {
            let mut store = build();
            let outcome = generate(&mut store, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_invariants(&store, &outcome);
            for day in &Day::ALL[..5] {
                assert_eq!(outcome.schedule.cell(*day, Shift::Morning)[0], "A");
                assert_eq!(outcome.schedule.cell(*day, Shift::Afternoon)[0], "B");
            }
        }
    }

    #[test]
    fn test_regenerate_starts_from_clean_state() {
        let mut store = EmployeeStore::new();
        for name in ["A", "B", "C", "D", "E", "F", "G", "H", "I"] {
            store.add(name, BTreeMap::new()).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(3);

        generate(&mut store, &mut rng).unwrap();
        let outcome = generate(&mut store, &mut rng).unwrap();

        assert_invariants(&store, &outcome);
        let total_days: usize = store.iter().map(|e| e.days_worked).sum();
        let filled: usize = outcome.schedule.iter().map(|(_, _, names)| names.len()).sum();
        assert_eq!(total_days, filled);
    }
}
