//! Scheduling parameters for rotation planning.

use crate::constants;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// Maximum allowed password age in days.
    #[serde(default = "default_reset_period")]
    pub reset_period: u32,

    /// Maximum number of password changes on any single day.
    #[serde(default = "default_max_changes_per_day")]
    pub max_changes_per_day: u32,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            reset_period: default_reset_period(),
            max_changes_per_day: default_max_changes_per_day(),
        }
    }
}

impl ScheduleSection {
    /// Apply command-line overrides on top of the configured values.
    pub fn with_overrides(self, reset_period: Option<u32>, max_changes_per_day: Option<u32>) -> Self {
        Self {
            reset_period: reset_period.unwrap_or(self.reset_period),
            max_changes_per_day: max_changes_per_day.unwrap_or(self.max_changes_per_day),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reset_period == 0 {
            bail!("reset_period must be a positive number of days");
        }
        if self.max_changes_per_day == 0 {
            bail!("max_changes_per_day must be positive");
        }
        Ok(())
    }

    /// Total number of changes the horizon can absorb.
    pub fn capacity(&self) -> u64 {
        u64::from(self.reset_period) * u64::from(self.max_changes_per_day)
    }
}

fn default_reset_period() -> u32 {
    constants::DEFAULT_RESET_PERIOD
}

fn default_max_changes_per_day() -> u32 {
    constants::DEFAULT_MAX_CHANGES_PER_DAY
}
