use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use super::allocation::{allocate_nurses, headcount};
use super::capacity::estimate_admission_capacity;
use super::census::{take_census, Census};
use super::hours::{total_hours, AuxiliaryRoles, ShiftHeadcounts};
use super::projection::{project_beds, ProjectionStage};
use super::types::{Bed, NurseAssignment, Shift, StaffingSnapshot};
use crate::config::UnitConfig;
use crate::error::{Result, StaffingError};

/// Staffing for one shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPlan {
    pub shift: Shift,
    /// Headcount used for the shift: the rostered figure if given, else `required_nurses`.
    pub headcount: u32,
    /// Nurses the bed configuration needs, in-charge included.
    pub required_nurses: u32,
    pub assignments: Vec<NurseAssignment>,
    /// Admission options. Not estimated for the handover shift.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_capacity: Option<Vec<String>>,
}

/// Result of one recomputation over a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingReport {
    pub am: ShiftPlan,
    pub pm: ShiftPlan,
    pub night: ShiftPlan,
    /// Empty beds after handover.
    pub available_beds: u32,
    pub total_hours: f64,
    pub census: Census,
}

impl StaffingReport {
    pub fn headcounts(&self) -> ShiftHeadcounts {
        ShiftHeadcounts {
            am: self.am.headcount,
            pm: self.pm.headcount,
            night: self.night.headcount,
        }
    }
}

/// The unit must list every bed exactly once.
fn check_layout(beds: &[Bed], bed_count: u8) -> Result<()> {
    if beds.len() != bed_count as usize {
        return Err(StaffingError::BedCount {
            expected: bed_count as usize,
            actual: beds.len(),
        });
    }
    let mut seen = BTreeSet::new();
    for bed in beds {
        if bed.id == 0 || bed.id > bed_count {
            return Err(StaffingError::BedOutOfRange { id: bed.id, bed_count });
        }
        if !seen.insert(bed.id) {
            return Err(StaffingError::DuplicateBed { id: bed.id });
        }
    }
    Ok(())
}

/// Recomputes the whole staffing picture from a snapshot.
///
/// Pure: the snapshot is not modified and nothing is kept between calls.
#[instrument(skip_all, fields(beds = snapshot.beds.len()))]
pub fn recompute(snapshot: &StaffingSnapshot, config: &UnitConfig) -> Result<StaffingReport> {
    check_layout(&snapshot.beds, config.bed_count)?;
    let in_charge = snapshot.include_in_charge;

    // AM works the handed-over unit, PM and Night the settled one
    let handover = project_beds(&snapshot.beds, ProjectionStage::Handover, config.bed_count)?;
    let following = project_beds(&snapshot.beds, ProjectionStage::Following, config.bed_count)?;

    let am_assignments = allocate_nurses(&handover);
    let following_assignments = allocate_nurses(&following);

    let am_required = headcount(&am_assignments, in_charge);
    let following_required = headcount(&following_assignments, in_charge);
    let available_beds = (config.bed_count as u32).saturating_sub(following.len() as u32);

    let plan_following = |shift: Shift, rostered: Option<u32>| {
        // Rostered nurses beyond the requirement show up as new-nurse options
        let headcount = rostered.unwrap_or(following_required);
        let capacity = estimate_admission_capacity(
            headcount,
            in_charge,
            &following_assignments,
            available_beds,
            &config.capacity_ratio_classes,
        );
        debug!(?shift, headcount, has_capacity = capacity.has_capacity(), "planned shift");
        ShiftPlan {
            shift,
            headcount,
            required_nurses: following_required,
            assignments: following_assignments.clone(),
            admission_capacity: Some(capacity.lines()),
        }
    };
    let pm = plan_following(Shift::Pm, snapshot.pm_nurses);
    let night = plan_following(Shift::Night, snapshot.night_nurses);

    let am = ShiftPlan {
        shift: Shift::Am,
        headcount: snapshot.am_nurses.unwrap_or(am_required),
        required_nurses: am_required,
        assignments: am_assignments,
        admission_capacity: None,
    };

    let mut report = StaffingReport {
        am,
        pm,
        night,
        available_beds,
        total_hours: 0.0,
        census: take_census(&snapshot.beds, &following),
    };
    report.total_hours = total_hours(&report.headcounts(), &AuxiliaryRoles::from_snapshot(snapshot), config);

    debug!(
        am = report.am.headcount,
        pm = report.pm.headcount,
        night = report.night.headcount,
        hours = report.total_hours,
        "recomputed staffing"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::normalize_beds;
    use crate::staffing::types::BedStatus;

    fn snapshot(beds: Vec<Bed>) -> StaffingSnapshot {
        StaffingSnapshot::with_beds(normalize_beds(beds, 11).unwrap())
    }

    #[test]
    fn test_empty_unit() {
        let report = recompute(&StaffingSnapshot::empty(11), &UnitConfig::default()).unwrap();
        assert_eq!(report.am.headcount, 1);
        assert_eq!(report.pm.headcount, 1);
        assert_eq!(report.available_beds, 11);
        assert_eq!(
            report.pm.admission_capacity,
            Some(vec!["No capacity - no bedside nurses available".to_string()])
        );
        assert_eq!(report.total_hours, 26.0);
    }

    #[test]
    fn test_ward_transfer_changes_following_shifts_only() {
        let mut ward = Bed::new(2, "1:2").with_status(BedStatus::ToWard);
        ward.new_admission_after_ward = "1:1".into();
        let report = recompute(
            &snapshot(vec![Bed::new(1, "1:2"), ward, Bed::new(3, "1:2")]),
            &UnitConfig::default(),
        )
        .unwrap();

        assert_eq!(report.am.assignments.len(), 1);
        assert_eq!(report.am.headcount, 2);
        assert_eq!(report.pm.assignments.len(), 2);
        assert_eq!(report.pm.headcount, 3);
        assert_eq!(report.night.headcount, 3);
        assert_eq!(report.available_beds, 8);
    }

    #[test]
    fn test_rostered_headcounts_override() {
        let mut snap = snapshot(vec![Bed::new(1, "1:2"), Bed::new(2, "1:2")]);
        snap.am_nurses = Some(4);
        snap.pm_nurses = Some(3);
        let report = recompute(&snap, &UnitConfig::default()).unwrap();

        assert_eq!(report.am.headcount, 4);
        assert_eq!(report.am.required_nurses, 2);
        assert_eq!(report.pm.headcount, 3);
        assert_eq!(report.night.headcount, 2);
        let pm_lines = report.pm.admission_capacity.unwrap();
        assert_eq!(pm_lines[0], "1 × 1:1 patient (using 1 new nurse)");
        assert_eq!(
            report.night.admission_capacity.unwrap(),
            vec!["No capacity - all nurses at maximum workload".to_string()]
        );
    }

    #[test]
    fn test_layout_errors() {
        let config = UnitConfig::default();
        let short = StaffingSnapshot::with_beds(vec![Bed::new(1, "1:2")]);
        assert!(matches!(
            recompute(&short, &config),
            Err(StaffingError::BedCount { expected: 11, actual: 1 })
        ));

        let mut beds: Vec<Bed> = (1..=11).map(Bed::empty).collect();
        beds[10].id = 3;
        assert!(matches!(
            recompute(&StaffingSnapshot::with_beds(beds), &config),
            Err(StaffingError::DuplicateBed { id: 3 })
        ));
    }

    #[test]
    fn test_snapshot_untouched_and_repeatable() {
        let mut turnover = Bed::new(4, "1:3").with_status(BedStatus::Turnover);
        turnover.new_ratio = "1:2".into();
        let snap = snapshot(vec![Bed::new(1, "1:1"), turnover, Bed::new(6, "1:3")]);
        let before = snap.clone();

        let first = recompute(&snap, &UnitConfig::default()).unwrap();
        let second = recompute(&snap, &UnitConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(snap, before);
    }

    #[test]
    fn test_census_matches_available_beds() {
        let mut ward = Bed::new(2, "1:2").with_status(BedStatus::ToWard);
        ward.new_admission_after_ward = "1:2".into();
        let mut change = Bed::new(4, "1:3").with_status(BedStatus::ChangeRatio);
        change.new_ratio = "1:2".into();
        let mut mover = Bed::new(7, "1:3").with_status(BedStatus::BedMove);
        mover.move_to_bed = "10".into();
        let mut snap = snapshot(vec![
            Bed::new(1, "1:1"),
            ward,
            change,
            mover,
            Bed::new(8, "1:4").with_status(BedStatus::ComingIn),
            Bed::new(11, "1:2").with_status(BedStatus::Discharge),
        ]);
        snap.include_ward_clerk = true;

        let report = recompute(&snap, &UnitConfig::default()).unwrap();
        assert_eq!(report.census.expected_final, 5);
        assert_eq!(report.census.expected_final + report.available_beds, 11);
        assert_eq!(
            report.total_hours,
            total_hours(&report.headcounts(), &AuxiliaryRoles::from_snapshot(&snap), &UnitConfig::default())
        );
    }
}
