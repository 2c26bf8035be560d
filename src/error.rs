use thiserror::Error;

/// Errors raised while loading or validating a staffing snapshot.
///
/// Parse failures of individual ratio or time fields are not errors: they
/// degrade to "empty bed" or "zero hours" and never reach this type.
#[derive(Error, Debug)]
pub enum StaffingError {
    #[error("bed {target} is the move target of both bed {first_source} and bed {second_source}")]
    DuplicateMoveTarget {
        target: u8,
        first_source: u8,
        second_source: u8,
    },

    #[error("bed {source_bed} is moved into bed {target}, which still holds a patient")]
    MoveTargetOccupied { target: u8, source_bed: u8 },

    #[error("bed id {id} is outside the unit (beds 1-{bed_count})")]
    BedOutOfRange { id: u8, bed_count: u8 },

    #[error("bed {id} appears more than once")]
    DuplicateBed { id: u8 },

    #[error("expected {expected} beds, got {actual}")]
    BedCount { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StaffingError>;
