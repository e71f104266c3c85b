//! Bounded linear undo/redo history.

use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 50;

/// A bounded sequence of immutable snapshots with a cursor.
///
/// `current()` is always `snapshots[cursor]`. Committing while redo is
/// possible drops the redo branch. When the capacity is exceeded the oldest
/// snapshot is evicted and the cursor shifts with it.
///
/// A history belongs to a single editing session; it has no interior
/// synchronization.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY));
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    pub fn current(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    /// Record `state` as the new current snapshot.
    pub fn commit(&mut self, state: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(state);
        self.cursor = self.snapshots.len() - 1;

        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Collapse to a single snapshot holding the current state.
    pub fn reset(&mut self) {
        let keep = self.cursor;
        self.snapshots.truncate(keep + 1);
        self.snapshots.drain(..keep);
        self.cursor = 0;
    }

    /// Collapse to a single snapshot holding `state`.
    pub fn reset_to(&mut self, state: T) {
        self.snapshots.clear();
        self.snapshots.push_back(state);
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
