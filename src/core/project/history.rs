//! Snapshot History
//!
//! Linear undo/redo over immutable editor-state snapshots. A new commit
//! truncates any redo tail, appends, and advances the index; committing a
//! state structurally equal to the current one is suppressed so no-op
//! gestures never pollute history.

use tracing::debug;

use super::state::EditorState;

/// Default cap on retained snapshots
const DEFAULT_MAX_SNAPSHOTS: usize = 100;

/// Undo/redo container over editor-state snapshots
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<EditorState>,
    current: usize,
    max_snapshots: usize,
}

impl History {
    /// Creates a history seeded with the initial state
    pub fn new(initial: EditorState) -> Self {
        Self {
            snapshots: vec![initial],
            current: 0,
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
        }
    }

    /// Sets the maximum number of retained snapshots
    pub fn with_max_snapshots(mut self, max: usize) -> Self {
        self.max_snapshots = max.max(1);
        self
    }

    /// The current snapshot; consumers only ever read this one
    pub fn current(&self) -> &EditorState {
        &self.snapshots[self.current]
    }

    /// Commits a new snapshot.
    ///
    /// Returns false when the candidate equals the current snapshot and the
    /// commit was suppressed.
    pub fn commit(&mut self, next: EditorState) -> bool {
        if next == self.snapshots[self.current] {
            debug!("commit suppressed: state unchanged");
            return false;
        }

        self.snapshots.truncate(self.current + 1);
        self.snapshots.push(next);
        self.current += 1;

        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.remove(0);
            self.current -= 1;
        }
        true
    }

    /// Steps back one snapshot; a no-op at the beginning of history
    pub fn undo(&mut self) -> &EditorState {
        if self.current > 0 {
            self.current -= 1;
        }
        self.current()
    }

    /// Steps forward one snapshot; a no-op at the end of history
    pub fn redo(&mut self) -> &EditorState {
        if self.current + 1 < self.snapshots.len() {
            self.current += 1;
        }
        self.current()
    }

    /// Returns true when a prior snapshot exists
    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    /// Returns true when an undone snapshot can be reapplied
    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// A history always holds at least the initial snapshot
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(EditorState::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
