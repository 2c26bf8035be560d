use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use super::types::{Bed, BedOrigin, BedStatus, EffectiveBed};
use crate::error::{Result, StaffingError};
use crate::parser::parse_ratio;

/// Which side of the shift boundary a projection describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionStage {
    /// The shift being handed over (AM). Ward transfers have already left.
    Handover,
    /// The shifts after handover (PM and Night). A ward bed may hold its
    /// replacement admission.
    Following,
}

/// A patient arriving in a bed from somewhere else on the unit.
#[derive(Debug, Clone)]
struct IncomingMove {
    source: u8,
    ratio: String,
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .map(|c| c.trim())
        .find(|c| !c.is_empty())
        .unwrap_or("")
}

/// Resolves the bed a moving patient goes to, if the entry is usable.
fn move_target(bed: &Bed, bed_count: u8) -> Option<u8> {
    let raw = bed.move_to_bed.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u8>() {
        Ok(target) if target >= 1 && target <= bed_count && target != bed.id => Some(target),
        _ => {
            warn!(bed = bed.id, target = %raw, "ignoring bed move with invalid target");
            None
        }
    }
}

/// The patient a bed holds at `stage` when nothing moves into it.
/// `None` for a bed that ends up empty or holds no valid ratio.
fn resident_patient<'a>(
    bed: &'a Bed,
    stage: ProjectionStage,
    moved_out: &BTreeSet<u8>,
    admissions_after_move: &'a BTreeMap<u8, String>,
) -> Option<(&'a str, BedOrigin)> {
    if let Some(admission) = admissions_after_move.get(&bed.id) {
        return parse_ratio(admission).map(|_| (admission.as_str(), BedOrigin::Admission));
    }
    if moved_out.contains(&bed.id) {
        return None;
    }

    let resident = match bed.status {
        BedStatus::Discharge => return None,
        BedStatus::ToWard => match stage {
            ProjectionStage::Handover => return None,
            // backfilled only once the ward patient has left
            ProjectionStage::Following => (bed.new_admission_after_ward.trim(), BedOrigin::Admission),
        },
        BedStatus::Turnover if parse_ratio(&bed.new_ratio).is_some() => {
            (bed.new_ratio.as_str(), BedOrigin::NewPatient)
        }
        BedStatus::Turnover => (bed.ratio.as_str(), BedOrigin::NewPatient),
        BedStatus::ChangeRatio if parse_ratio(&bed.new_ratio).is_some() => {
            (bed.new_ratio.as_str(), BedOrigin::RatioChanged)
        }
        BedStatus::ComingIn => (bed.ratio.as_str(), BedOrigin::Admission),
        _ => (bed.ratio.as_str(), BedOrigin::Staying),
    };
    parse_ratio(resident.0).map(|_| resident)
}

/// Projects the unit forward to the given stage, applying every planned
/// transition. Returns the occupied beds in bed-id order.
///
/// Fails when two patients would end up in the same bed: two moves with one
/// target, or a move into a bed whose patient stays or is replaced.
pub fn project_beds(beds: &[Bed], stage: ProjectionStage, bed_count: u8) -> Result<Vec<EffectiveBed>> {
    let mut incoming: BTreeMap<u8, IncomingMove> = BTreeMap::new();
    let mut admissions_after_move: BTreeMap<u8, String> = BTreeMap::new();
    let mut moved_out: BTreeSet<u8> = BTreeSet::new();

    // Collect moves first so every bed knows who arrives and who leaves
    for bed in beds.iter().filter(|b| b.status.is_move()) {
        let Some(target) = move_target(bed, bed_count) else {
            continue;
        };

        // Explicit move ratio, then the planned new ratio, then the current one
        let ratio = first_non_empty(&[
            bed.move_new_ratio.as_str(),
            bed.new_ratio.as_str(),
            bed.ratio.as_str(),
        ]);
        if parse_ratio(ratio).is_none() {
            warn!(bed = bed.id, target, "ignoring bed move without a valid ratio");
            continue;
        }
        if let Some(existing) = incoming.get(&target) {
            return Err(StaffingError::DuplicateMoveTarget {
                target,
                first_source: existing.source,
                second_source: bed.id,
            });
        }
        incoming.insert(
            target,
            IncomingMove {
                source: bed.id,
                ratio: ratio.to_string(),
            },
        );
        moved_out.insert(bed.id);

        let admission = bed.admission_after_move.trim();
        if !admission.is_empty() {
            admissions_after_move.insert(bed.id, admission.to_string());
        }
    }

    // Each bed ends up with either its resident or an arriving patient
    let mut projected = Vec::new();
    for bed in beds {
        let resident = resident_patient(bed, stage, &moved_out, &admissions_after_move);
        let (ratio, origin) = match (incoming.get(&bed.id), resident) {
            // a second patient for the same bed
            (Some(arrival), Some(_)) => {
                return Err(StaffingError::MoveTargetOccupied {
                    target: bed.id,
                    source_bed: arrival.source,
                });
            }
            (Some(arrival), None) => (arrival.ratio.as_str(), BedOrigin::MovedFrom(arrival.source)),
            (None, Some(resident)) => resident,
            (None, None) => continue,
        };

        if let Some(patient_count) = parse_ratio(ratio) {
            projected.push(EffectiveBed {
                id: bed.id,
                patient_count,
                origin,
            });
        }
    }

    projected.sort_by_key(|b| b.id);
    debug!(?stage, occupied = projected.len(), moves = incoming.len(), "projected bed configuration");
    Ok(projected)
}
