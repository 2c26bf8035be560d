use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::types::{EffectiveBed, NurseAssignment};

/// Groups effective beds into nurse assignments.
///
/// Order of work:
/// 1. every 1:1 bed gets its own nurse
/// 2. each 1:N group (N >= 2, ascending) is batched N beds per nurse
/// 3. leftovers are packed first-fit into existing nurses, opening a new
///    nurse when none has room
///
/// No nurse's workload exceeds 1.0 and nurse ids run from 1 in creation order.
pub fn allocate_nurses(beds: &[EffectiveBed]) -> Vec<NurseAssignment> {
    // Group by ratio; a 1:0 bed has no patient to staff
    let mut groups: BTreeMap<u32, Vec<EffectiveBed>> = BTreeMap::new();
    for bed in beds {
        if bed.patient_count == 0 {
            warn!(bed = bed.id, "skipping bed with a 1:0 ratio");
            continue;
        }
        groups.entry(bed.patient_count).or_default().push(*bed);
    }

    let mut assignments: Vec<NurseAssignment> = Vec::new();
    let mut next_id = 1u32;
    let mut open_nurse = |assignments: &mut Vec<NurseAssignment>, beds: Vec<EffectiveBed>| {
        assignments.push(NurseAssignment { id: next_id, beds });
        next_id += 1;
    };

    // 1:1 patients never share a nurse
    if let Some(one_to_one) = groups.remove(&1) {
        for bed in one_to_one {
            open_nurse(&mut assignments, vec![bed]);
        }
    }

    // Full batches of N beds per nurse, smallest N first
    let mut remaining: Vec<EffectiveBed> = Vec::new();
    for (patient_count, group) in groups {
        let batch = patient_count as usize;
        let mut chunks = group.chunks_exact(batch);
        for chunk in chunks.by_ref() {
            open_nurse(&mut assignments, chunk.to_vec());
        }
        remaining.extend_from_slice(chunks.remainder());
    }

    // Leftovers go to the first nurse with room
    for bed in remaining {
        match assignments.iter_mut().find(|nurse| nurse.can_take(&bed)) {
            Some(nurse) => {
                debug!(bed = bed.id, nurse = nurse.id, "packing leftover bed into existing nurse");
                nurse.beds.push(bed);
            }
            None => open_nurse(&mut assignments, vec![bed]),
        }
    }

    assignments
}

/// Shift headcount: one nurse per assignment, plus the in-charge nurse.
pub fn headcount(assignments: &[NurseAssignment], include_in_charge: bool) -> u32 {
    assignments.len() as u32 + u32::from(include_in_charge)
}
