//! Rolling window of recently observed counter values.

use std::collections::VecDeque;

/// Number of values kept by [`HistoryBuffer`].
pub const HISTORY_CAPACITY: usize = 5;

/// Fixed-capacity FIFO of counter values, oldest first.
///
/// Entries only leave through capacity eviction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryBuffer {
    values: VecDeque<i64>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            values: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a value, evicting the oldest entry once over capacity.
    pub fn record(&mut self, value: i64) {
        self.values.push_back(value);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = i64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.values.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<i64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bar heights in `[0, 1]`, normalised against the largest entry.
    ///
    /// The divisor never drops below 1, so an all-zero history yields zero
    /// heights instead of dividing by zero. Negative values render as 0.
    pub fn relative_heights(&self) -> Vec<f64> {
        let max = self.values.iter().copied().max().unwrap_or(1).max(1) as f64;
        self.values
            .iter()
            .map(|&value| (value.max(0) as f64 / max).min(1.0))
            .collect()
    }
}
