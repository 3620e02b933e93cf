//! Binary min-heap of days that still have spare capacity.

/// A day and the number of credentials currently assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLoad {
    pub day: usize,
    pub load: usize,
}

impl DayLoad {
    // Lower load first; among equal loads the earlier day wins.
    fn key(&self) -> (usize, usize) {
        (self.load, self.day)
    }
}

/// Min-heap ordered by day load.
///
/// Entries are only pushed for days below capacity and the caller removes a
/// day (by popping it) before changing its load, so stored loads never go
/// stale.
#[derive(Debug, Clone, Default)]
pub struct OccupancyHeap {
    entries: Vec<DayLoad>,
}

impl OccupancyHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> Option<&DayLoad> {
        self.entries.first()
    }

    pub fn push(&mut self, entry: DayLoad) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    pub fn pop(&mut self) -> Option<DayLoad> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.entries[idx].key() >= self.entries[parent].key() {
                break;
            }
            self.entries.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.entries[left].key() < self.entries[smallest].key() {
                smallest = left;
            }
            if right < len && self.entries[right].key() < self.entries[smallest].key() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.entries.swap(idx, smallest);
            idx = smallest;
        }
    }
}
