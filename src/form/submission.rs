use serde::{Deserialize, Serialize};

use crate::parser::PreferenceRecord;
use crate::schedule::{Day, ShiftCode};

/// Single-employee form data, one shift code per day as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSubmission {
    pub name: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
}

impl EmployeeSubmission {
    fn raw_codes(&self) -> [(Day, &str); 7] {
        [
            (Day::Monday, self.monday.as_str()),
            (Day::Tuesday, self.tuesday.as_str()),
            (Day::Wednesday, self.wednesday.as_str()),
            (Day::Thursday, self.thursday.as_str()),
            (Day::Friday, self.friday.as_str()),
            (Day::Saturday, self.saturday.as_str()),
            (Day::Sunday, self.sunday.as_str()),
        ]
    }
}

/// Validates a submission and converts it into a preference record.
///
/// An empty day field counts as `N`.
pub fn validate_submission(req: &EmployeeSubmission) -> Result<PreferenceRecord, String> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err("Employee name is required".to_string());
    }

    let mut codes = [ShiftCode::NoShift; 7];
    for (slot, (day, raw)) in codes.iter_mut().zip(req.raw_codes()) {
        if raw.trim().is_empty() {
            continue;
        }
        *slot = ShiftCode::from_code(raw).ok_or_else(|| {
            format!(
                "Invalid shift code '{}' for {}: use M (Morning), A (Afternoon), E (Evening) or N (No Shift)",
                raw, day
            )
        })?;
    }

    Ok(PreferenceRecord::from_codes(name, &codes))
}
