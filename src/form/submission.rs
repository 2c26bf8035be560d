use crate::error::{Result, StaffingError};
use crate::staffing::StaffingSnapshot;

/// Ratio fields accept digits and colons while being typed ("1", "1:", "1:2").
pub fn validate_ratio_input(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == ':')
}

/// Time range fields accept digits and dashes ("0700-15").
pub fn validate_time_input(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// Validates a snapshot submitted from the frontend
pub fn validate_snapshot(snapshot: &StaffingSnapshot) -> Result<()> {
    for bed in &snapshot.beds {
        let ratio_fields = [
            ("ratio", &bed.ratio),
            ("new ratio", &bed.new_ratio),
            ("move ratio", &bed.move_new_ratio),
            ("admission after move", &bed.admission_after_move),
            ("admission after ward", &bed.new_admission_after_ward),
        ];
        for (name, value) in ratio_fields {
            if !validate_ratio_input(value) {
                return Err(StaffingError::InvalidInput(format!(
                    "Bed {}: invalid {} '{}'",
                    bed.id, name, value
                )));
            }
        }

        if !bed.move_to_bed.chars().all(|c| c.is_ascii_digit()) {
            return Err(StaffingError::InvalidInput(format!(
                "Bed {}: move target must be a bed number",
                bed.id
            )));
        }
    }

    if !validate_time_input(&snapshot.cne_hours) {
        return Err(StaffingError::InvalidInput(format!(
            "Invalid CNE hours '{}'",
            snapshot.cne_hours
        )));
    }

    Ok(())
}
