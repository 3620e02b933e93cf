//! Per-day lists of credential identifiers.

use crate::models::schedule::DayBlock;

/// Ordered list of credential IDs for each day of the horizon.
///
/// Every mutation moves identifiers between days or into/out of the caller,
/// so the total held is conserved unless the caller takes a bucket.
#[derive(Debug, Clone, Default)]
pub struct DayBuckets {
    buckets: Vec<Vec<String>>,
}

impl DayBuckets {
    pub fn new(days: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); days],
        }
    }

    pub fn days(&self) -> usize {
        self.buckets.len()
    }

    pub fn push(&mut self, day: usize, id: String) {
        self.buckets[day].push(id);
    }

    pub fn len(&self, day: usize) -> usize {
        self.buckets[day].len()
    }

    /// Move the most recently added identifier of `from` to the end of `to`.
    /// `from` must not be empty.
    pub fn move_last(&mut self, from: usize, to: usize) {
        debug_assert!(!self.buckets[from].is_empty(), "day {} is empty", from);
        if let Some(id) = self.buckets[from].pop() {
            self.buckets[to].push(id);
        }
    }

    /// Empty `day`, returning its identifiers in bucket order.
    pub fn take(&mut self, day: usize) -> Vec<String> {
        std::mem::take(&mut self.buckets[day])
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Non-empty days in increasing order.
    pub fn into_blocks(self) -> Vec<DayBlock> {
        self.buckets
            .into_iter()
            .enumerate()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(day, credentials)| DayBlock { day, credentials })
            .collect()
    }
}
