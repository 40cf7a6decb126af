//! Linear undo/redo history of raster snapshots.
//!
//! An append-only list with a cursor. Committing while the cursor sits
//! before the tail discards every later snapshot first — the standard
//! branch-discarding linear history. Undo and redo move the cursor and
//! hand back the snapshot to restore; they never mutate the list.

use crate::surface::Snapshot;

/// Snapshot history with a cursor that always indexes a valid step.
#[derive(Debug, Clone)]
pub struct History {
    steps: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Start a history from the initial (usually blank) surface state.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            steps: vec![initial],
            cursor: 0,
        }
    }

    /// Number of stored steps. Always at least 1.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Current step index, in [0, len).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.steps.len()
    }

    /// Commit a new snapshot after a completed stroke or clear. Discards
    /// any redo branch beyond the cursor, appends, and advances.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.steps.truncate(self.cursor + 1);
        self.steps.push(snapshot);
        self.cursor += 1;
    }

    /// Step back, returning the snapshot to restore. `None` at the start
    /// of history.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.steps[self.cursor])
    }

    /// Step forward, returning the snapshot to restore. `None` at the
    /// tail.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.steps.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.steps[self.cursor])
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.steps[self.cursor]
    }
}

// ============================================================================
// Tests
// ============================================================================
