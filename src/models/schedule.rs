//! Computed rotation schedule.

use serde::Serialize;

/// Credentials assigned to one day offset (0 = today).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBlock {
    pub day: usize,
    pub credentials: Vec<String>,
}

/// Day-ordered assignment of credentials. Days with nothing due are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub reset_period: u32,
    pub max_changes_per_day: u32,
    pub days: Vec<DayBlock>,
}

impl Schedule {
    /// The block for `day`, if anything is due that day.
    pub fn day(&self, day: usize) -> Option<&DayBlock> {
        self.days
            .binary_search_by_key(&day, |b| b.day)
            .ok()
            .map(|idx| &self.days[idx])
    }

    /// Credentials due today.
    pub fn due_today(&self) -> &[String] {
        self.day(0).map(|b| b.credentials.as_slice()).unwrap_or(&[])
    }

    /// Day offset assigned to `id`.
    pub fn day_of(&self, id: &str) -> Option<usize> {
        self.days
            .iter()
            .find(|b| b.credentials.iter().any(|c| c == id))
            .map(|b| b.day)
    }

    /// Number of scheduled credentials.
    pub fn total(&self) -> usize {
        self.days.iter().map(|b| b.credentials.len()).sum()
    }

    /// Largest number of changes on any day.
    pub fn peak(&self) -> usize {
        self.days.iter().map(|b| b.credentials.len()).max().unwrap_or(0)
    }

    /// Per-day change counts across the whole horizon, including empty days.
    pub fn loads(&self) -> Vec<usize> {
        let mut loads = vec![0; self.reset_period as usize];
        for block in &self.days {
            loads[block.day] = block.credentials.len();
        }
        loads
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
