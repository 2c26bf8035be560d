use serde::{Deserialize, Serialize};

use super::types::{Bed, BedStatus, EffectiveBed};
use crate::parser::parse_ratio;

/// Patient counts by planned transition, over beds with a valid ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Census {
    pub total_patients: u32,
    pub staying: u32,
    pub ratio_changes: u32,
    pub moves: u32,
    pub to_ward: u32,
    pub coming_in: u32,
    pub turnover: u32,
    pub discharges: u32,
    /// Occupied beds once every planned movement is done.
    pub expected_final: u32,
}

/// Counts the snapshot's patients by status. `settled` is the unit after
/// all movements (the projection used for PM and Night).
pub fn take_census(beds: &[Bed], settled: &[EffectiveBed]) -> Census {
    let mut census = Census::default();
    for bed in beds.iter().filter(|b| parse_ratio(&b.ratio).is_some()) {
        census.total_patients += 1;
        match bed.status {
            BedStatus::Current => census.staying += 1,
            BedStatus::ChangeRatio => census.ratio_changes += 1,
            BedStatus::BedMove | BedStatus::BedMoveWithRatio => census.moves += 1,
            BedStatus::ToWard => census.to_ward += 1,
            BedStatus::ComingIn => census.coming_in += 1,
            BedStatus::Turnover => census.turnover += 1,
            BedStatus::Discharge => census.discharges += 1,
        }
    }
    census.expected_final = settled.len() as u32;
    census
}
