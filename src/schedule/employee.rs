use std::collections::BTreeMap;

use super::types::{Day, Shift, MAX_DAYS_PER_WEEK};
use crate::error::{Result, SchedulerError};

/// Position of an employee in the store. Store order is tie-break priority.
pub type EmployeeId = usize;

/// An employee with per-day shift preferences and the live assignment state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub name: String,
    /// day -> preferred shifts, first entry tried first
    pub preferences: BTreeMap<Day, Vec<Shift>>,
    /// day -> shift actually assigned
    pub assignments: BTreeMap<Day, Shift>,
    pub days_worked: usize,
}

impl Employee {
    fn new(name: String, preferences: BTreeMap<Day, Vec<Shift>>) -> Self {
        Self {
            name,
            preferences,
            assignments: BTreeMap::new(),
            days_worked: 0,
        }
    }

    /// Under the weekly cap and not yet working `day`
    pub fn is_available(&self, day: Day) -> bool {
        self.days_worked < MAX_DAYS_PER_WEEK && !self.assignments.contains_key(&day)
    }

    pub fn prefers(&self, day: Day, shift: Shift) -> bool {
        self.preferred_shifts(day).contains(&shift)
    }

    pub fn preferred_shifts(&self, day: Day) -> &[Shift] {
        self.preferences.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn assigned_shift(&self, day: Day) -> Option<Shift> {
        self.assignments.get(&day).copied()
    }
}

/// Owns the employee list and answers eligibility queries
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
}

impl EmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new employee with no assignments.
    ///
    /// The name is trimmed; a blank name is rejected and nothing is added.
    pub fn add(
        &mut self,
        name: &str,
        preferences: BTreeMap<Day, Vec<Shift>>,
    ) -> Result<EmployeeId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchedulerError::InvalidInput(
                "Employee name cannot be empty".to_string(),
            ));
        }

        // Days with an empty preference list carry no preference at all
        let preferences = preferences
            .into_iter()
            .filter(|(_, shifts)| !shifts.is_empty())
            .collect();

        self.employees.push(Employee::new(name.to_string(), preferences));
        Ok(self.employees.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    /// Employees who can take `shift` on `day` and asked for it, in store order
    pub fn eligible(&self, day: Day, shift: Shift) -> Vec<EmployeeId> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_available(day) && e.prefers(day, shift))
            .map(|(id, _)| id)
            .collect()
    }

    /// Employees who can take any shift on `day`, preference ignored
    pub fn eligible_any_shift(&self, day: Day) -> Vec<EmployeeId> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_available(day))
            .map(|(id, _)| id)
            .collect()
    }

    /// Records that `id` works `shift` on `day`.
    ///
    /// Fails with `CapacityExceeded` when the employee is already at the
    /// weekly cap or already works that day.
    pub fn commit(&mut self, id: EmployeeId, day: Day, shift: Shift) -> Result<()> {
        let employee = self.employees.get_mut(id).ok_or_else(|| {
            SchedulerError::InvalidInput(format!("Unknown employee id {}", id))
        })?;

        if !employee.is_available(day) {
            return Err(SchedulerError::CapacityExceeded {
                name: employee.name.clone(),
                day,
            });
        }

        employee.assignments.insert(day, shift);
        employee.days_worked += 1;
        Ok(())
    }

    /// Drops all assignment state, keeping employees and preferences
    pub fn clear_assignments(&mut self) {
        for employee in &mut self.employees {
            employee.assignments.clear();
            employee.days_worked = 0;
        }
    }
}
