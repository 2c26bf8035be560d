use std::fmt;

use tracing::debug;

use super::types::NurseAssignment;

/// One admission scenario the current staffing could absorb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityOption {
    /// Nurses already carrying patients have room for `count` more 1:`ratio` patients.
    Existing { ratio: u32, count: u32 },
    /// Bedside nurses without patients could take `patients` 1:`ratio` patients.
    /// `additional` marks it as on top of the `Existing` options rather than instead of them.
    NewNurses {
        ratio: u32,
        patients: u32,
        nurses: u32,
        additional: bool,
    },
}

fn plural(count: u32) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

impl fmt::Display for CapacityOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityOption::Existing { ratio, count } => {
                write!(f, "{} × 1:{} patient{}", count, ratio, plural(*count))
            }
            CapacityOption::NewNurses {
                ratio,
                patients,
                nurses,
                additional,
            } => {
                if *additional {
                    write!(f, "AND ")?;
                }
                write!(
                    f,
                    "{} × 1:{} patient{} (using {} new nurse{})",
                    patients,
                    ratio,
                    plural(*patients),
                    nurses,
                    plural(*nurses)
                )
            }
        }
    }
}

/// Outcome of an admission capacity estimate for one shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionCapacity {
    NoBedsideNurses,
    AllBedsOccupied,
    AllNursesAtMaximum,
    Options(Vec<CapacityOption>),
}

impl AdmissionCapacity {
    pub fn has_capacity(&self) -> bool {
        matches!(self, AdmissionCapacity::Options(_))
    }

    /// Display lines, one per option, or the single "No capacity" message.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AdmissionCapacity::NoBedsideNurses => {
                vec!["No capacity - no bedside nurses available".to_string()]
            }
            AdmissionCapacity::AllBedsOccupied => {
                vec!["No capacity - all beds occupied (after planned movements)".to_string()]
            }
            AdmissionCapacity::AllNursesAtMaximum => {
                vec!["No capacity - all nurses at maximum workload".to_string()]
            }
            AdmissionCapacity::Options(options) => options.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Whether a nurse with free capacity could take one more 1:`ratio` patient.
/// A 1:1 patient needs a nurse with no other patients.
fn can_accept(nurse: &NurseAssignment, ratio: u32) -> bool {
    if ratio == 1 {
        nurse.beds.is_empty()
    } else {
        nurse.remaining_capacity() > 0
    }
}

/// Estimates which extra admissions a shift could absorb.
///
/// `headcount` includes the in-charge nurse when `include_in_charge` is set.
/// Each assigned nurse may carry up to the most restrictive ratio among its
/// beds; remaining bedside nurses with no beds are offered as new-nurse
/// options, bounded by `available_beds`.
pub fn estimate_admission_capacity(
    headcount: u32,
    include_in_charge: bool,
    assignments: &[NurseAssignment],
    available_beds: u32,
    ratio_classes: &[u32],
) -> AdmissionCapacity {
    let bedside = headcount as i64 - i64::from(include_in_charge);
    if bedside <= 0 {
        return AdmissionCapacity::NoBedsideNurses;
    }
    if available_beds == 0 {
        return AdmissionCapacity::AllBedsOccupied;
    }

    let active: Vec<&NurseAssignment> = assignments.iter().filter(|n| !n.beds.is_empty()).collect();
    let with_room: Vec<&NurseAssignment> = active
        .iter()
        .copied()
        .filter(|n| n.remaining_capacity() > 0)
        .collect();

    // 1:0 is not a ratio
    let classes: Vec<u32> = ratio_classes.iter().copied().filter(|&r| r > 0).collect();

    // Room on nurses who already carry patients
    let mut options: Vec<CapacityOption> = classes
        .iter()
        .filter_map(|&ratio| {
            let takers = with_room.iter().filter(|n| can_accept(n, ratio)).count() as u32;
            (takers > 0).then(|| CapacityOption::Existing {
                ratio,
                count: takers.min(available_beds),
            })
        })
        .collect();

    // Bedside nurses without beds, offered on top of the existing room
    let unassigned = (bedside as u64).saturating_sub(active.len() as u64) as u32;
    if unassigned > 0 {
        let additional = !options.is_empty();
        for &ratio in &classes {
            let nurses_needed = available_beds.div_ceil(ratio);
            let nurses = nurses_needed.min(unassigned);
            let patients = (nurses * ratio).min(available_beds);
            if patients > 0 {
                options.push(CapacityOption::NewNurses {
                    ratio,
                    patients,
                    nurses,
                    additional,
                });
            }
        }
    }

    debug!(
        bedside,
        active = active.len(),
        with_room = with_room.len(),
        unassigned,
        available_beds,
        options = options.len(),
        "estimated admission capacity"
    );

    if options.is_empty() {
        AdmissionCapacity::AllNursesAtMaximum
    } else {
        AdmissionCapacity::Options(options)
    }
}
