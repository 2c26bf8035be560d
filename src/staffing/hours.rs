use serde::{Deserialize, Serialize};

use super::types::StaffingSnapshot;
use crate::config::UnitConfig;
use crate::parser::parse_time_range_hours;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHeadcounts {
    pub am: u32,
    pub pm: u32,
    pub night: u32,
}

/// Non-bedside roles that add hours once per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliaryRoles<'a> {
    pub ward_clerk: bool,
    pub am515: bool,
    /// CNE time range ("HHMM-HHMM") when the role is rostered.
    pub cne: Option<&'a str>,
}

impl<'a> AuxiliaryRoles<'a> {
    pub fn from_snapshot(snapshot: &'a StaffingSnapshot) -> Self {
        AuxiliaryRoles {
            ward_clerk: snapshot.include_ward_clerk,
            am515: snapshot.include_am515,
            cne: snapshot.include_cne.then_some(snapshot.cne_hours.as_str()),
        }
    }
}

/// Total rostered hours across the 24-hour period.
pub fn total_hours(headcounts: &ShiftHeadcounts, roles: &AuxiliaryRoles<'_>, config: &UnitConfig) -> f64 {
    let mut total = headcounts.am as f64 * config.am_shift_hours
        + headcounts.pm as f64 * config.pm_shift_hours
        + headcounts.night as f64 * config.night_shift_hours;

    if roles.ward_clerk {
        total += config.ward_clerk_hours;
    }
    if roles.am515 {
        total += config.am515_hours;
    }
    if let Some(range) = roles.cne {
        total += parse_time_range_hours(range);
    }
    total
}
