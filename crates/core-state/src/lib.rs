//! Editor state: the buffer, cursor, selection anchor, dirty flag and undo
//! history for one document.
//!
//! One `EditorState` per document — a host editing several documents
//! constructs one instance each and passes it explicitly; nothing here is
//! global. All operations are total over a well-formed state: inputs are
//! clamped, never rejected, and invariant violations are programming defects
//! guarded by debug assertions rather than an error channel.
//!
//! Selection model: an anchor position plus the cursor (the active end).
//! Equal anchor and cursor mean "no selection". The pair is only normalized
//! into an ordered [`SelectionSpan`] at consumption time (deletion, copy,
//! highlight), so extend-selection gestures keep the anchor fixed while the
//! cursor moves.

pub mod history;

use core_text::{Buffer, Position, SelectionSpan, wrap};
use history::History;

pub use history::MAX_UNDO;

/// Lines a page motion travels.
pub const PAGE_LINES: usize = 20;

/// Tunable limits, normally sourced from the preferences file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub cols: usize,
    pub max_undo: usize,
    pub page_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            cols: wrap::COLS,
            max_undo: MAX_UNDO,
            page_lines: PAGE_LINES,
        }
    }
}

#[derive(Debug)]
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Position,
    pub anchor: Position,
    pub dirty: bool,
    limits: Limits,
    history: History,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            buffer: Buffer::new(),
            cursor: Position::origin(),
            anchor: Position::origin(),
            dirty: false,
            limits,
            history: History::new(limits.max_undo),
        }
    }

    pub fn cols(&self) -> usize {
        self.limits.cols
    }

    pub fn page_lines(&self) -> usize {
        self.limits.page_lines
    }

    pub fn max_undo(&self) -> usize {
        self.limits.max_undo
    }

    /// Replace the document wholesale: wrap the logical text, home the
    /// cursor, clear the selection and both history stacks, reset dirty.
    pub fn load_text(&mut self, text: &str) {
        self.buffer = Buffer::from_text(text, self.limits.cols);
        self.cursor = Position::origin();
        self.anchor = Position::origin();
        self.dirty = false;
        self.history.clear();
    }

    /// Joined logical text (the save representation).
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// The selection as an ordered span; empty (start == end == cursor) when
    /// no selection is active.
    pub fn selection_span(&self) -> SelectionSpan {
        SelectionSpan::new(self.anchor, self.cursor)
    }

    pub fn selected_text(&self) -> String {
        self.buffer.span_text(self.selection_span())
    }

    /// Collapse the selection to the cursor.
    pub fn collapse_selection(&mut self) {
        self.anchor = self.cursor;
    }

    pub fn select_all(&mut self) {
        self.anchor = Position::origin();
        self.cursor = self.buffer.end_position();
    }

    /// Host glue for pointer hit-testing: clamp and move the cursor,
    /// collapsing any selection.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = Position::new(row.min(self.buffer.line_count() - 1), 0);
        self.cursor.col = self.buffer.clamp_col(self.cursor.row, col);
        self.collapse_selection();
    }

    /// Record the pre-mutation state. Every content mutation calls this
    /// before applying itself; pure cursor motion never does.
    pub fn snapshot(&mut self) {
        self.history.push(&self.buffer, self.cursor);
    }

    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&mut self.buffer, &mut self.cursor);
        if restored {
            self.collapse_selection();
            self.dirty = true;
        }
        restored
    }

    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo(&mut self.buffer, &mut self.cursor);
        if restored {
            self.collapse_selection();
            self.dirty = true;
        }
        restored
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Debug-build invariant sweep; called by tests after mutation batches.
    pub fn assert_invariants(&self) {
        debug_assert!(self.buffer.line_count() >= 1, "buffer never empty");
        debug_assert!(
            self.cursor.row < self.buffer.line_count(),
            "cursor row within buffer"
        );
        debug_assert!(
            self.cursor.col <= self.buffer.line_len(self.cursor.row),
            "cursor col within line"
        );
        debug_assert!(
            self.anchor.row < self.buffer.line_count()
                && self.anchor.col <= self.buffer.line_len(self.anchor.row),
            "anchor within buffer"
        );
        for r in 0..self.buffer.line_count() {
            debug_assert!(
                self.buffer.line_len(r) <= self.limits.cols,
                "physical line within wrap width"
            );
        }
    }
}
