/// Fixed-capacity ring of closed-frame hit counts.
///
/// Invariants:
/// - `len()` is `min(frames pushed, capacity)`
/// - once full, `sum()` is the hit count of the last `capacity` frames
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    slots: Vec<u64>,
    cursor: usize,
    filled: usize,
}

impl SlidingWindow {
    /// # Panics
    ///
    /// Panics if `capacity` is zero; config validation rules that out.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sliding window needs at least one slot");
        Self {
            slots: vec![0; capacity],
            cursor: 0,
            filled: 0,
        }
    }

    /// Record one closed frame, overwriting the oldest slot once full.
    pub fn push(&mut self, hits: u64) {
        self.slots[self.cursor] = hits;
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.filled = (self.filled + 1).min(self.slots.len());
    }

    pub fn sum(&self) -> u64 {
        self.slots.iter().sum()
    }

    /// Number of meaningful slots.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.filled
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.filled == 0
    }

    #[cfg(test)]
    pub(crate) fn is_full(&self) -> bool {
        self.filled == self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Meaningful slots, oldest first.
    #[cfg(test)]
    pub(crate) fn frames(&self) -> Vec<u64> {
        let cap = self.slots.len();
        let start = (self.cursor + cap - self.filled) % cap;
        (0..self.filled).map(|i| self.slots[(start + i) % cap]).collect()
    }
}
