//! Error type for the rotation scheduler.

use thiserror::Error;

/// Reasons a scheduling run is rejected.
///
/// Every variant is returned before any credential is placed, except
/// [`ScheduleError::UnplacedCredentials`], which is checked once after the
/// last day has been processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("reset period must be a positive number of days")]
    InvalidResetPeriod,

    #[error("max changes per day must be positive")]
    InvalidMaxChanges,

    /// Credential at position `index` in the input has an empty identifier.
    #[error("credential #{index} has an empty identifier")]
    EmptyIdentifier { index: usize },

    #[error("credential '{id}' has a negative age ({age_days} days)")]
    NegativeAge { id: String, age_days: i64 },

    /// `max_changes_per_day * reset_period` cannot hold every credential.
    #[error(
        "{credentials} credentials exceed capacity {capacity} \
         ({max_changes_per_day} per day over {reset_period} days)"
    )]
    Infeasible {
        credentials: usize,
        capacity: u64,
        reset_period: u32,
        max_changes_per_day: u32,
    },

    /// Carry-over residue remained after the last day of the horizon.
    #[error("{} credentials could not be placed within the horizon", .remaining.len())]
    UnplacedCredentials { remaining: Vec<String> },
}
