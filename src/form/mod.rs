pub mod submission;
pub mod export;

pub use submission::{validate_ratio_input, validate_snapshot, validate_time_input};
pub use export::export_assignments_to_csv;
