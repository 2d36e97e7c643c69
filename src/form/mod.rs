pub mod submission;
pub mod export;

pub use submission::{validate_submission, EmployeeSubmission};
pub use export::{save_assignments, save_preferences, write_assignments, write_preferences};
