//! Nurse staffing calculator for a fixed-size hospital unit.
//!
//! Takes a snapshot of bed ratios and planned transitions and works out
//! nurse assignments, headcounts, admission capacity and rostered hours for
//! the AM, PM and Night shifts. Every calculation is a pure function of the
//! snapshot; see [`staffing::recompute`].

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logging;
pub mod parser;
pub mod staffing;
pub mod web;

pub use config::UnitConfig;
pub use error::{Result, StaffingError};
pub use parser::{parse_ratio, parse_time_range_hours};
pub use staffing::{recompute, Bed, BedStatus, StaffingReport, StaffingSnapshot};
