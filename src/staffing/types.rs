use serde::{Deserialize, Serialize};

/// Planned transition for a bed across the shift boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BedStatus {
    #[default]
    Current,
    ChangeRatio,
    BedMove,
    BedMoveWithRatio,
    ToWard,
    ComingIn,
    Discharge,
    Turnover,
}

impl BedStatus {
    pub const ALL: [BedStatus; 8] = [
        BedStatus::Current,
        BedStatus::ChangeRatio,
        BedStatus::BedMove,
        BedStatus::BedMoveWithRatio,
        BedStatus::ToWard,
        BedStatus::ComingIn,
        BedStatus::Discharge,
        BedStatus::Turnover,
    ];

    /// Wire name, as used in JSON snapshots and bed sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            BedStatus::Current => "current",
            BedStatus::ChangeRatio => "changeRatio",
            BedStatus::BedMove => "bedMove",
            BedStatus::BedMoveWithRatio => "bedMoveWithRatio",
            BedStatus::ToWard => "toWard",
            BedStatus::ComingIn => "comingIn",
            BedStatus::Discharge => "discharge",
            BedStatus::Turnover => "turnover",
        }
    }

    /// Case-insensitive lookup of a wire name; `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
    }

    pub fn is_move(&self) -> bool {
        matches!(self, BedStatus::BedMove | BedStatus::BedMoveWithRatio)
    }
}

/// One physical bed as entered by the user. Ratio fields hold the raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bed {
    pub id: u8,
    pub ratio: String,
    pub status: BedStatus,
    pub new_ratio: String,
    pub move_to_bed: String,
    pub move_new_ratio: String,
    pub admission_after_move: String,
    pub new_admission_after_ward: String,
}

impl Bed {
    pub fn empty(id: u8) -> Self {
        Bed {
            id,
            ..Bed::default()
        }
    }

    pub fn new(id: u8, ratio: &str) -> Self {
        Bed {
            id,
            ratio: ratio.to_string(),
            ..Bed::default()
        }
    }

    pub fn with_status(mut self, status: BedStatus) -> Self {
        self.status = status;
        self
    }
}

/// Where the patient in an effective bed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "bed")]
pub enum BedOrigin {
    Staying,
    RatioChanged,
    /// Turnover: the previous patient left and a new one took the bed.
    NewPatient,
    Admission,
    MovedFrom(u8),
}

/// A bed as it will be during the target shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveBed {
    pub id: u8,
    pub patient_count: u32,
    pub origin: BedOrigin,
}

impl EffectiveBed {
    /// Share of one nurse this bed consumes (1/N).
    pub fn load(&self) -> f64 {
        1.0 / self.patient_count as f64
    }
}

/// Tolerance used when comparing summed workloads against 1.0.
pub const WORKLOAD_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseAssignment {
    pub id: u32,
    pub beds: Vec<EffectiveBed>,
}

impl NurseAssignment {
    pub fn new(id: u32) -> Self {
        NurseAssignment {
            id,
            beds: Vec::new(),
        }
    }

    /// Sum of 1/N over assigned beds; 1.0 is a full load.
    pub fn workload(&self) -> f64 {
        self.beds.iter().map(EffectiveBed::load).sum()
    }

    pub fn can_take(&self, bed: &EffectiveBed) -> bool {
        self.workload() + bed.load() <= 1.0 + WORKLOAD_EPSILON
    }

    /// Most restrictive ratio among current beds, or `None` with no beds.
    pub fn max_patient_capacity(&self) -> Option<u32> {
        self.beds.iter().map(|b| b.patient_count).min()
    }

    pub fn remaining_capacity(&self) -> u32 {
        self.max_patient_capacity()
            .map(|max| max.saturating_sub(self.beds.len() as u32))
            .unwrap_or(0)
    }

    pub fn band(&self) -> WorkloadBand {
        WorkloadBand::from_workload(self.workload())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkloadBand {
    Low,
    Moderate,
    High,
}

impl WorkloadBand {
    pub fn from_workload(workload: f64) -> Self {
        if workload >= 0.9 {
            WorkloadBand::High
        } else if workload >= 0.7 {
            WorkloadBand::Moderate
        } else {
            WorkloadBand::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shift {
    Am,
    Pm,
    Night,
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Am => "AM Shift",
            Shift::Pm => "PM Shift",
            Shift::Night => "Night Shift",
        }
    }
}

fn default_true() -> bool {
    true
}

/// Everything the caller knows at the moment of a recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingSnapshot {
    pub beds: Vec<Bed>,
    #[serde(default = "default_true")]
    pub include_in_charge: bool,
    #[serde(default)]
    pub include_ward_clerk: bool,
    #[serde(default, rename = "includeAM515")]
    pub include_am515: bool,
    #[serde(default, rename = "includeCNE")]
    pub include_cne: bool,
    #[serde(default)]
    pub cne_hours: String,
    /// Rostered AM headcount. Computed from the bed list when absent.
    #[serde(default)]
    pub am_nurses: Option<u32>,
    #[serde(default)]
    pub pm_nurses: Option<u32>,
    #[serde(default)]
    pub night_nurses: Option<u32>,
}

impl StaffingSnapshot {
    /// A unit with every bed empty and only the in-charge role enabled.
    pub fn empty(bed_count: u8) -> Self {
        Self::with_beds((1..=bed_count).map(Bed::empty).collect())
    }

    pub fn with_beds(beds: Vec<Bed>) -> Self {
        StaffingSnapshot {
            beds,
            include_in_charge: true,
            include_ward_clerk: false,
            include_am515: false,
            include_cne: false,
            cne_hours: String::new(),
            am_nurses: None,
            pm_nurses: None,
            night_nurses: None,
        }
    }
}
