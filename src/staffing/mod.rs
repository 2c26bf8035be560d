pub mod types;
pub mod projection;
pub mod allocation;
pub mod capacity;
pub mod hours;
pub mod census;
pub mod pipeline;

pub use types::{
    Bed, BedOrigin, BedStatus, EffectiveBed, NurseAssignment, Shift, StaffingSnapshot, WorkloadBand,
    WORKLOAD_EPSILON,
};
pub use projection::{project_beds, ProjectionStage};
pub use allocation::{allocate_nurses, headcount};
pub use capacity::{estimate_admission_capacity, AdmissionCapacity, CapacityOption};
pub use hours::{total_hours, AuxiliaryRoles, ShiftHeadcounts};
pub use census::{take_census, Census};
pub use pipeline::{recompute, ShiftPlan, StaffingReport};
