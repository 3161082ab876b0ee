//! Bounded snapshot-based undo/redo.
//!
//! Each history entry is a deep copy of the physical lines plus the cursor,
//! captured *before* a mutation applies. Edits are bounded by wrap-width
//! lines, so whole-buffer copies stay cheap; a diff-based log would have to
//! reason about patches across reflow boundaries to give the same
//! correctness guarantee.
//!
//! Restore clamps the snapshot cursor against the restored buffer — the two
//! are captured together and should always agree, but an inconsistent
//! snapshot must never produce an out-of-range cursor.

use core_text::{Buffer, Position};
use tracing::trace;

/// Maximum number of snapshots retained; the oldest is dropped beyond this.
pub const MAX_UNDO: usize = 500;

#[derive(Debug, Clone)]
struct Snapshot {
    lines: Vec<String>,
    cursor: Position,
}

impl Snapshot {
    fn capture(buffer: &Buffer, cursor: Position) -> Self {
        Self {
            lines: buffer.lines().to_vec(),
            cursor,
        }
    }

    fn restore(self, buffer: &mut Buffer, cursor: &mut Position) {
        buffer.set_lines(self.lines);
        *cursor = self.cursor;
        cursor.clamp_to(buffer);
    }
}

#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_UNDO)
    }
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            cap: cap.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record the pre-mutation state. Any new edit invalidates the redo
    /// branch, so the redo stack is cleared here and only here.
    pub fn push(&mut self, buffer: &Buffer, cursor: Position) {
        self.undo_stack.push(Snapshot::capture(buffer, cursor));
        if self.undo_stack.len() > self.cap {
            self.undo_stack.remove(0);
            trace!(target: "state.history", cap = self.cap, "undo_stack_trimmed");
        }
        self.redo_stack.clear();
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            lines = buffer.line_count(),
            "push_snapshot"
        );
    }

    /// Swap the live state with the top undo snapshot. Returns false when
    /// there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut Buffer, cursor: &mut Position) -> bool {
        let Some(snap) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(Snapshot::capture(buffer, *cursor));
        snap.restore(buffer, cursor);
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "undo_pop"
        );
        true
    }

    /// Symmetric to [`History::undo`], replaying the redo stack.
    pub fn redo(&mut self, buffer: &mut Buffer, cursor: &mut Position) -> bool {
        let Some(snap) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(Snapshot::capture(buffer, *cursor));
        snap.restore(buffer, cursor);
        trace!(
            target: "state.history",
            undo_depth = self.undo_stack.len(),
            redo_depth = self.redo_stack.len(),
            "redo_pop"
        );
        true
    }

    /// Drop both stacks. Called when a document is replaced wholesale — undo
    /// must never cross into a previous document.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        trace!(target: "state.history", "history_cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::wrap::COLS;

    #[test]
    fn undo_on_empty_stack_is_noop() {
        let mut h = History::default();
        let mut b = Buffer::from_text("abc", COLS);
        let mut cur = Position::origin();
        assert!(!h.undo(&mut b, &mut cur));
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn undo_restores_lines_and_cursor() {
        let mut h = History::default();
        let mut b = Buffer::from_text("abc", COLS);
        let mut cur = Position::new(0, 3);
        h.push(&b, cur);
        b.set_lines(vec!["abcd".into()]);
        cur = Position::new(0, 4);
        assert!(h.undo(&mut b, &mut cur));
        assert_eq!(b.text(), "abc");
        assert_eq!(cur, Position::new(0, 3));
        assert_eq!(h.redo_depth(), 1);
    }

    #[test]
    fn redo_replays_undone_change() {
        let mut h = History::default();
        let mut b = Buffer::from_text("abc", COLS);
        let mut cur = Position::new(0, 3);
        h.push(&b, cur);
        b.set_lines(vec!["abcd".into()]);
        cur = Position::new(0, 4);
        h.undo(&mut b, &mut cur);
        assert!(h.redo(&mut b, &mut cur));
        assert_eq!(b.text(), "abcd");
        assert_eq!(cur, Position::new(0, 4));
    }

    #[test]
    fn new_push_clears_redo_branch() {
        let mut h = History::default();
        let mut b = Buffer::from_text("abc", COLS);
        let mut cur = Position::origin();
        h.push(&b, cur);
        b.set_lines(vec!["x".into()]);
        h.undo(&mut b, &mut cur);
        assert_eq!(h.redo_depth(), 1);
        h.push(&b, cur);
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn cap_drops_oldest_snapshot() {
        let mut h = History::new(2);
        let mut b = Buffer::from_text("v0", COLS);
        let mut cur = Position::origin();
        for i in 1..=3 {
            h.push(&b, cur);
            b.set_lines(vec![format!("v{i}")]);
        }
        assert_eq!(h.undo_depth(), 2);
        // Oldest ("v0") was dropped; two undos land on v1, not further.
        assert!(h.undo(&mut b, &mut cur));
        assert!(h.undo(&mut b, &mut cur));
        assert!(!h.undo(&mut b, &mut cur));
        assert_eq!(b.text(), "v1");
    }

    #[test]
    fn restore_clamps_inconsistent_cursor() {
        let mut h = History::default();
        let mut b = Buffer::from_text("one line", COLS);
        h.push(&b, Position::new(7, 42));
        b.set_lines(vec!["other".into()]);
        let mut cur = Position::origin();
        h.undo(&mut b, &mut cur);
        assert_eq!(cur, Position::new(0, 8));
    }
}
