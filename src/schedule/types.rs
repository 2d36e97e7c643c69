use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Most days one employee may work in a week
pub const MAX_DAYS_PER_WEEK: usize = 5;

/// Minimum headcount for every (day, shift) cell
pub const MIN_STAFF_PER_SHIFT: usize = 2;

/// Day of the scheduling week. Ordering follows the calendar, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A schedulable shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
    Evening,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    pub fn name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
        }
    }

    pub fn code(self) -> ShiftCode {
        match self {
            Shift::Morning => ShiftCode::Morning,
            Shift::Afternoon => ShiftCode::Afternoon,
            Shift::Evening => ShiftCode::Evening,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single-letter shift code as it appears in the tabular format.
///
/// `NoShift` only exists here: it marks "no preference" / "not working" and
/// can never be turned into a [`Shift`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftCode {
    Morning,
    Afternoon,
    Evening,
    NoShift,
}

impl ShiftCode {
    /// Parses `M`, `A`, `E` or `N`, ignoring case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<ShiftCode> {
        match code.trim().to_uppercase().as_str() {
            "M" => Some(ShiftCode::Morning),
            "A" => Some(ShiftCode::Afternoon),
            "E" => Some(ShiftCode::Evening),
            "N" => Some(ShiftCode::NoShift),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftCode::Morning => "M",
            ShiftCode::Afternoon => "A",
            ShiftCode::Evening => "E",
            ShiftCode::NoShift => "N",
        }
    }

    pub fn shift(self) -> Option<Shift> {
        match self {
            ShiftCode::Morning => Some(Shift::Morning),
            ShiftCode::Afternoon => Some(Shift::Afternoon),
            ShiftCode::Evening => Some(Shift::Evening),
            ShiftCode::NoShift => None,
        }
    }
}

impl From<Option<Shift>> for ShiftCode {
    fn from(shift: Option<Shift>) -> Self {
        shift.map(Shift::code).unwrap_or(ShiftCode::NoShift)
    }
}

/// Weekly schedule: day -> shift -> names in assignment order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    cells: BTreeMap<Day, BTreeMap<Shift, Vec<String>>>,
}

impl WeeklySchedule {
    /// Every (day, shift) cell starts out empty
    pub fn new() -> Self {
        let cells = Day::ALL
            .iter()
            .map(|&day| {
                let shifts = Shift::ALL.iter().map(|&shift| (shift, Vec::new())).collect();
                (day, shifts)
            })
            .collect();
        Self { cells }
    }

    pub fn cell(&self, day: Day, shift: Shift) -> &[String] {
        self.cells
            .get(&day)
            .and_then(|shifts| shifts.get(&shift))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn headcount(&self, day: Day, shift: Shift) -> usize {
        self.cell(day, shift).len()
    }

    pub(crate) fn push(&mut self, day: Day, shift: Shift, name: &str) {
        self.cells
            .entry(day)
            .or_default()
            .entry(shift)
            .or_default()
            .push(name.to_string());
    }

    /// All cells in calendar order, shifts in Morning/Afternoon/Evening order
    pub fn iter(&self) -> impl Iterator<Item = (Day, Shift, &[String])> + '_ {
        self.cells.iter().flat_map(|(&day, shifts)| {
            shifts
                .iter()
                .map(move |(&shift, names)| (day, shift, names.as_slice()))
        })
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell that could not reach minimum coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub day: Day,
    pub shift: Shift,
    /// How many more employees the cell needed
    pub missing: usize,
}

/// Result of one scheduling run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub schedule: WeeklySchedule,
    pub shortfalls: Vec<Shortfall>,
}

impl GeneratedSchedule {
    pub fn is_fully_covered(&self) -> bool {
        self.shortfalls.is_empty()
    }

    pub fn shortfall_for(&self, day: Day, shift: Shift) -> Option<&Shortfall> {
        self.shortfalls
            .iter()
            .find(|s| s.day == day && s.shift == shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_codes() {
        assert_eq!(ShiftCode::from_code("m"), Some(ShiftCode::Morning));
        assert_eq!(ShiftCode::from_code(" A "), Some(ShiftCode::Afternoon));
        assert_eq!(ShiftCode::from_code("e"), Some(ShiftCode::Evening));
        assert_eq!(ShiftCode::from_code("N"), Some(ShiftCode::NoShift));
        assert_eq!(ShiftCode::from_code("X"), None);
        assert_eq!(ShiftCode::from_code(""), None);

        for shift in Shift::ALL {
            assert_eq!(shift.code().shift(), Some(shift));
        }
        assert_eq!(ShiftCode::NoShift.shift(), None);
        assert_eq!(ShiftCode::from(None).as_str(), "N");
    }

    #[test]
    fn test_days_are_in_calendar_order() {
        let mut sorted = Day::ALL;
        sorted.sort();
        assert_eq!(sorted, Day::ALL);
        assert_eq!(Day::ALL[0].to_string(), "Monday");
        assert_eq!(Day::ALL[6].to_string(), "Sunday");
    }

    #[test]
    fn test_new_schedule_has_every_cell_empty() {
        let schedule = WeeklySchedule::new();
        let cells: Vec<_> = schedule.iter().collect();
        assert_eq!(cells.len(), 21);
        assert!(cells.iter().all(|(_, _, names)| names.is_empty()));
        assert_eq!(cells[0].0, Day::Monday);
        assert_eq!(cells[0].1, Shift::Morning);
        assert_eq!(cells[20].0, Day::Sunday);
        assert_eq!(cells[20].1, Shift::Evening);
    }

    #[test]
    fn test_push_keeps_assignment_order() {
        let mut schedule = WeeklySchedule::new();
        schedule.push(Day::Tuesday, Shift::Evening, "Zoe");
        schedule.push(Day::Tuesday, Shift::Evening, "Adam");
        assert_eq!(schedule.cell(Day::Tuesday, Shift::Evening), ["Zoe", "Adam"]);
        assert_eq!(schedule.headcount(Day::Tuesday, Shift::Morning), 0);
    }
}
