//! Snapshot stack for undo/redo.
//!
//! Snapshots are owned deep copies of the full authoring state — never
//! references into the live store — so restoring one cannot be affected by
//! subsequent live edits. A new commit truncates any redo branch beyond the
//! cursor. Undo at the bottom and redo at the top are no-ops, not errors.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use serde::{Deserialize, Serialize};

use crate::element::SceneElement;
use crate::track::AnimationTrack;

/// An immutable deep copy of the full authoring state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elements: Vec<SceneElement>,
    pub tracks: Vec<AnimationTrack>,
}

/// Stack of snapshots with a cursor. Unbounded by default; a bounded
/// depth drops the oldest snapshot on overflow.
#[derive(Debug, Default)]
pub struct History {
    stack: Vec<Snapshot>,
    cursor: usize,
    capacity: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that retains at most `capacity` snapshots,
    /// evicting the oldest on overflow. A capacity of zero is treated
    /// as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { stack: Vec::new(), cursor: 0, capacity: Some(capacity.max(1)) }
    }

    /// Append a snapshot after the cursor, truncating any redo branch.
    pub fn commit(&mut self, snapshot: Snapshot) {
        if !self.stack.is_empty() {
            self.stack.truncate(self.cursor + 1);
        }
        self.stack.push(snapshot);
        self.cursor = self.stack.len() - 1;
        if let Some(capacity) = self.capacity
            && self.stack.len() > capacity
        {
            let excess = self.stack.len() - capacity;
            self.stack.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Step back one snapshot. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 || self.stack.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.stack.get(self.cursor)
    }

    /// Step forward one snapshot. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.stack.is_empty() || self.cursor >= self.stack.len() - 1 {
            return None;
        }
        self.cursor += 1;
        self.stack.get(self.cursor)
    }

    /// The snapshot at the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.stack.get(self.cursor)
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if no snapshot has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether an undo would change state.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo would change state.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.stack.is_empty() && self.cursor < self.stack.len() - 1
    }
}
