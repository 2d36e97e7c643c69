pub mod types;
pub mod employee;
pub mod preference;
pub mod coverage;
pub mod engine;

pub use types::{
    Day, GeneratedSchedule, Shift, ShiftCode, Shortfall, WeeklySchedule, MAX_DAYS_PER_WEEK,
    MIN_STAFF_PER_SHIFT,
};
pub use employee::{Employee, EmployeeId, EmployeeStore};
pub use engine::generate;
