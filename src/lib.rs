//! Password rotation scheduling.
//!
//! Spreads password changes for a set of credentials over a reset period so
//! that no credential outlives the period and no day carries more than a
//! fixed number of changes.
//!
//! ## Modules
//! - `cli` — Command-line handlers
//! - `core` — Scheduler and age providers
//! - `models` — Data structures
//! - `util` — Filesystem helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod logging;
pub mod models;
pub mod util;

pub use crate::core::{schedule, ScheduleError};
pub use crate::models::credential::CredentialAge;
pub use crate::models::schedule::{DayBlock, Schedule};
pub use crate::models::schedule_settings::ScheduleSection;
