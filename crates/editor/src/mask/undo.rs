//! Snapshot undo history for the mask canvas
//!
//! Linear history of full-canvas snapshots with a cursor. Index 0 is
//! always the blank canvas, so undoing every stroke lands on empty.

use lumina_ipc::{DataUri, IpcError};
use tracing::debug;

use super::MaskCanvas;

/// Full-canvas snapshots with a cursor into the current state
pub struct SnapshotHistory {
    snapshots: Vec<Vec<[u8; 4]>>,
    /// Index of the snapshot matching the current canvas state
    cursor: usize,
}

impl SnapshotHistory {
    /// Start a history whose only entry is the given baseline snapshot
    pub fn new(baseline: Vec<[u8; 4]>) -> Self {
        Self {
            snapshots: vec![baseline],
            cursor: 0,
        }
    }

    /// Record a new snapshot after the cursor, discarding any entries
    /// past it (redo state is lost once a new stroke lands)
    pub fn push(&mut self, snapshot: Vec<[u8; 4]>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Step back and return the snapshot to restore, or None at the start
    pub fn step_back(&mut self) -> Option<&[[u8; 4]]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward and return the snapshot to restore, or None at the end
    pub fn step_forward(&mut self) -> Option<&[[u8; 4]]> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }
}

impl MaskCanvas {
    /// Undo the last stroke.
    ///
    /// No-op at the start of history. Returns the mask to emit after the
    /// step: the restored canvas, or None when it is blank.
    pub fn undo(&mut self) -> Result<Option<DataUri>, IpcError> {
        match self.history.step_back() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => debug!("Undo: already at start of history"),
        }
        self.current_mask()
    }

    /// Redo the last undone stroke.
    ///
    /// No-op at the end of history. Returns the mask to emit after the
    /// step, as with [`MaskCanvas::undo`].
    pub fn redo(&mut self) -> Result<Option<DataUri>, IpcError> {
        match self.history.step_forward() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => debug!("Redo: already at end of history"),
        }
        self.current_mask()
    }
}
