// Randomized checks of allocation and recomputation invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ward_staffing::staffing::{allocate_nurses, BedOrigin, EffectiveBed, WORKLOAD_EPSILON};
use ward_staffing::{recompute, Bed, BedStatus, StaffingSnapshot, UnitConfig};

const SEEDS: u64 = 200;

fn random_beds(rng: &mut StdRng) -> Vec<EffectiveBed> {
    let count = rng.gen_range(0..=11u8);
    (1..=count)
        .map(|id| EffectiveBed {
            id,
            patient_count: rng.gen_range(1..=4),
            origin: BedOrigin::Staying,
        })
        .collect()
}

fn random_snapshot(rng: &mut StdRng) -> StaffingSnapshot {
    let mut beds: Vec<Bed> = (1..=11).map(Bed::empty).collect();
    for bed in beds.iter_mut() {
        if rng.gen_bool(0.25) {
            continue;
        }
        bed.ratio = format!("1:{}", rng.gen_range(1..=4));
        bed.status = BedStatus::ALL[rng.gen_range(0..BedStatus::ALL.len())];
        bed.new_ratio = format!("1:{}", rng.gen_range(1..=4));
        if rng.gen_bool(0.5) {
            bed.new_admission_after_ward = format!("1:{}", rng.gen_range(1..=4));
        }
    }
    // at most one mover, always into an empty bed, so targets never collide
    let empty: Vec<u8> = beds.iter().filter(|b| b.ratio.is_empty()).map(|b| b.id).collect();
    let mover = rng.gen_range(0..11usize);
    if !beds[mover].ratio.is_empty() && !empty.is_empty() {
        beds[mover].status = BedStatus::BedMove;
        beds[mover].move_to_bed = empty[rng.gen_range(0..empty.len())].to_string();
    }
    for bed in beds.iter_mut().filter(|b| b.status.is_move()) {
        if bed.move_to_bed.is_empty() {
            bed.status = BedStatus::Current;
        }
    }
    StaffingSnapshot::with_beds(beds)
}

#[test]
fn test_every_bed_assigned_once_within_capacity() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let beds = random_beds(&mut rng);
        let nurses = allocate_nurses(&beds);

        let mut assigned: Vec<u8> = nurses.iter().flat_map(|n| n.beds.iter().map(|b| b.id)).collect();
        assigned.sort_unstable();
        let expected: Vec<u8> = beds.iter().map(|b| b.id).collect();
        assert_eq!(assigned, expected, "seed {seed}");

        for nurse in &nurses {
            assert!(!nurse.beds.is_empty(), "seed {seed}");
            assert!(nurse.workload() <= 1.0 + WORKLOAD_EPSILON, "seed {seed}: {nurse:?}");
            if nurse.beds.iter().any(|b| b.patient_count == 1) {
                assert_eq!(nurse.beds.len(), 1, "seed {seed}: 1:1 shared");
            }
        }

        let ids: Vec<u32> = nurses.iter().map(|n| n.id).collect();
        assert_eq!(ids, (1..=nurses.len() as u32).collect::<Vec<_>>(), "seed {seed}");
    }
}

#[test]
fn test_recompute_invariants() {
    let config = UnitConfig::default();
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let snapshot = random_snapshot(&mut rng);
        let report = recompute(&snapshot, &config).unwrap();

        assert!(report.available_beds <= 11, "seed {seed}");
        for plan in [&report.am, &report.pm, &report.night] {
            assert_eq!(plan.required_nurses, plan.assignments.len() as u32 + 1, "seed {seed}");
            for nurse in &plan.assignments {
                assert!(nurse.workload() <= 1.0 + WORKLOAD_EPSILON, "seed {seed}");
            }
        }
        assert!(report.am.admission_capacity.is_none());
        assert!(report.pm.admission_capacity.as_ref().is_some_and(|l| !l.is_empty()));

        let occupied: usize = report.pm.assignments.iter().map(|n| n.beds.len()).sum();
        assert_eq!(report.available_beds as usize, 11 - occupied, "seed {seed}");
        assert_eq!(recompute(&snapshot, &config).unwrap(), report, "seed {seed}");
    }
}
