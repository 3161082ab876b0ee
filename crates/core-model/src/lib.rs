//! `Document`: the public facade over one edited document.
//!
//! Hosts talk to this type and nothing deeper: load text in, dispatch
//! actions, read lines/cursor/selection back out, re-render. One `Document`
//! per open document; a multi-document host constructs one instance each and
//! passes it around explicitly.
//!
//! Everything here is synchronous and runs to completion before returning —
//! the core never performs I/O, never touches a display surface and never
//! awaits. Asynchronous collaborators (clipboard readers, file loaders) call
//! back in with plain strings once their data is available.

use core_actions::dispatch;
use core_config::Config;
use core_state::{EditorState, Limits};
use core_text::wrap;

pub use core_actions::{Action, DispatchResult, EditKind, MotionKind};
pub use core_text::{Position, SelectionSpan};

pub struct Document {
    state: EditorState,
    tab_stop: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document with the built-in limits (80 columns, tab stop 8,
    /// 500 undo entries).
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
            tab_stop: wrap::TAB,
        }
    }

    /// A document tuned by a loaded preferences file.
    pub fn with_config(config: &Config) -> Self {
        let eff = config.effective();
        Self {
            state: EditorState::with_limits(Limits {
                cols: eff.columns,
                max_undo: eff.max_undo,
                page_lines: eff.page_lines,
            }),
            tab_stop: eff.tab_stop,
        }
    }

    // ---- document lifecycle -------------------------------------------------

    /// Replace the contents from full logical text: wrap, home the cursor,
    /// clear the selection, reset dirty, and drop both history stacks (undo
    /// must never reach into a previous document).
    pub fn load_text(&mut self, text: &str) {
        self.state.load_text(text);
    }

    /// The canonical save representation: physical lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.state.text()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    /// Host save path completed; unsaved-changes tracking restarts here.
    pub fn mark_clean(&mut self) {
        self.state.dirty = false;
    }

    // ---- read surface -------------------------------------------------------

    /// The wrapped physical lines, for rendering.
    pub fn lines(&self) -> &[String] {
        self.state.buffer.lines()
    }

    pub fn cursor(&self) -> Position {
        self.state.cursor
    }

    /// The active selection as an ordered (start, end) pair, or `None` when
    /// the anchor sits on the cursor.
    pub fn selection(&self) -> Option<(Position, Position)> {
        if self.state.has_selection() {
            let span = self.state.selection_span();
            Some((span.start, span.end))
        } else {
            None
        }
    }

    pub fn selected_text(&self) -> String {
        self.state.selected_text()
    }

    pub fn word_count(&self) -> usize {
        core_text::word_count(&self.text())
    }

    /// Markdown preview of the logical text as an HTML fragment.
    pub fn preview_html(&self) -> String {
        core_markdown::to_html(&self.text())
    }

    // ---- configuration (read-only once constructed) -------------------------

    pub fn cols(&self) -> usize {
        self.state.cols()
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn max_undo(&self) -> usize {
        self.state.max_undo()
    }

    pub fn page_lines(&self) -> usize {
        self.state.page_lines()
    }

    /// How many spaces a Tab press inserts at `col` to reach the next stop.
    pub fn soft_tab_width(&self, col: usize) -> usize {
        self.tab_stop - (col % self.tab_stop)
    }

    // ---- mutation and navigation --------------------------------------------

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        dispatch(action, &mut self.state)
    }

    /// Splice typed text (no newlines) at the cursor.
    pub fn insert_text(&mut self, text: &str) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::InsertText(text.to_string())))
    }

    /// Insert spaces up to the next tab stop, replacing any selection.
    pub fn insert_tab(&mut self) -> DispatchResult {
        // Width is computed against the selection start, where the spaces
        // will actually land.
        let col = self.state.selection_span().start.col;
        let spaces = " ".repeat(self.soft_tab_width(col));
        self.insert_text(&spaces)
    }

    pub fn newline(&mut self) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::Newline))
    }

    pub fn delete_backward(&mut self) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::DeleteBackward))
    }

    pub fn delete_forward(&mut self) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::DeleteForward))
    }

    pub fn delete_selection(&mut self) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::DeleteSelection))
    }

    /// Replace the selection (or splice at the cursor) with arbitrary text,
    /// newlines included. This is the paste entry point: the host reads its
    /// clipboard and hands the string over.
    pub fn paste(&mut self, text: &str) -> DispatchResult {
        self.dispatch(Action::Edit(EditKind::Paste(text.to_string())))
    }

    pub fn move_cursor(&mut self, kind: MotionKind, extend: bool) -> DispatchResult {
        self.dispatch(Action::Motion { kind, extend })
    }

    /// Host glue for pointer hit-testing: clamp and place the cursor,
    /// collapsing any selection.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.state.set_cursor(row, col);
    }

    pub fn select_all(&mut self) -> DispatchResult {
        self.dispatch(Action::SelectAll)
    }

    pub fn undo(&mut self) -> bool {
        self.dispatch(Action::Undo).dirty
    }

    pub fn redo(&mut self) -> bool {
        self.dispatch(Action::Redo).dirty
    }

    // ---- search -------------------------------------------------------------

    pub fn find_next(&mut self, query: &str, forward: bool, case_sensitive: bool) -> bool {
        core_search::find_next(&mut self.state, query, forward, case_sensitive)
    }

    pub fn replace_one(&mut self, query: &str, replacement: &str, case_sensitive: bool) -> bool {
        core_search::replace_one(&mut self.state, query, replacement, case_sensitive)
    }

    pub fn replace_all(&mut self, query: &str, replacement: &str, case_sensitive: bool) -> usize {
        core_search::replace_all(&mut self.state, query, replacement, case_sensitive)
    }
}
