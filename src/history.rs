//! Linear undo/redo history of scene snapshots.
//!
//! The history is a list of snapshots plus a cursor pointing at the one
//! that matches the live scene. Committing after an undo discards the redo
//! branch; there is no history tree.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::scene::SceneObject;

/// Snapshot stack. `T` is the snapshot payload; the editor stores object lists.
#[derive(Debug, Clone)]
pub struct History<T = Vec<SceneObject>> {
    snapshots: Vec<T>,
    cursor: usize,
}

impl<T: Clone> History<T> {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self { snapshots: vec![initial], cursor: 0 }
    }

    /// Drop every snapshot and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Record `state` after the cursor, discarding anything that was undone.
    pub fn commit(&mut self, state: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor = self.snapshots.len() - 1;
        log::debug!("history: commit -> {}/{}", self.cursor, self.snapshots.len());
    }

    /// Step back one snapshot. `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history: undo -> {}/{}", self.cursor, self.snapshots.len());
        self.snapshots.get(self.cursor).cloned()
    }

    /// Step forward one snapshot. `None` when already at the newest.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo -> {}/{}", self.cursor, self.snapshots.len());
        self.snapshots.get(self.cursor).cloned()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of stored snapshots, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: a history holds at least its initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the snapshot matching the live state.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.cursor)
    }
}

impl<T: Clone + Default> Default for History<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
