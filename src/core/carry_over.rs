//! FIFO of credentials displaced from an overfull day.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct CarryOverQueue {
    pending: VecDeque<String>,
}

impl CarryOverQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Append identifiers behind everything already waiting.
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.pending.extend(ids);
    }

    pub fn dequeue(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn into_remaining(self) -> Vec<String> {
        self.pending.into()
    }
}
