//! Dispatcher applying [`Action`]s to an [`EditorState`].
//!
//! This is the mutation and navigation surface of the core. External callers
//! (keyboard handlers, menu actions, a paste handler) build an `Action` and
//! hand it to [`dispatch`]; the handlers orchestrate snapshots, selection
//! semantics and buffer primitives, then report back whether anything
//! changed so the host knows to re-render.
//!
//! Decomposition mirrors the concern split:
//! * `edit`   — content mutation (insert/delete/newline/paste/selection)
//! * `motion` — cursor movement and selection extension
//!
//! Snapshot discipline: every handler that will change content records a
//! history snapshot *before* mutating, and only then; a no-op (delete at the
//! document edge, empty insert) records nothing, so undo never replays a
//! non-change. Pure motion never snapshots.

use core_state::EditorState;

mod edit;
mod motion;

/// A content mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Splice typed text (no newlines) at the cursor, reflowing the line.
    /// Replaces the active selection first.
    InsertText(String),
    /// Split the current line at the cursor (replaces the selection first).
    Newline,
    /// Delete one char before the cursor, or the selection when one is
    /// active. Joins lines at a line start.
    DeleteBackward,
    /// Delete one char at the cursor, or the selection when one is active.
    /// Joins lines at a line end.
    DeleteForward,
    /// Delete the active selection; no-op without one.
    DeleteSelection,
    /// Replace the selection (or splice at the cursor) with arbitrary text,
    /// newlines included, rewrapping the whole logical text.
    Paste(String),
}

/// A cursor movement. Paired with an `extend` flag in [`Action::Motion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocStart,
    DocEnd,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(EditKind),
    /// Move the cursor. With `extend` the anchor stays put and the motion
    /// grows the selection; without it the selection collapses to the
    /// destination.
    Motion {
        kind: MotionKind,
        extend: bool,
    },
    SelectAll,
    Undo,
    Redo,
}

/// Result of dispatching a single [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Anything observable changed; the host should re-render.
    pub dirty: bool,
    /// The buffer was rebuilt wholesale (load/paste/undo across a structural
    /// change); render caches keyed by line identity must be invalidated.
    pub buffer_replaced: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            buffer_replaced: false,
        }
    }

    pub fn clean() -> Self {
        Self {
            dirty: false,
            buffer_replaced: false,
        }
    }

    pub fn buffer_replaced() -> Self {
        Self {
            dirty: true,
            buffer_replaced: true,
        }
    }
}

pub fn dispatch(action: Action, state: &mut EditorState) -> DispatchResult {
    let result = match action {
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Motion { kind, extend } => motion::handle_motion(kind, extend, state),
        Action::SelectAll => {
            state.select_all();
            DispatchResult::dirty()
        }
        Action::Undo => handle_undo(state),
        Action::Redo => handle_redo(state),
    };
    #[cfg(debug_assertions)]
    state.assert_invariants();
    result
}

fn handle_undo(state: &mut EditorState) -> DispatchResult {
    let before = state.buffer.line_count();
    if state.undo() {
        let after = state.buffer.line_count();
        tracing::trace!(target: "actions.dispatch", op = "undo", buffer_changed = (before != after), "undo");
        if before != after {
            DispatchResult::buffer_replaced()
        } else {
            DispatchResult::dirty()
        }
    } else {
        DispatchResult::clean()
    }
}

fn handle_redo(state: &mut EditorState) -> DispatchResult {
    let before = state.buffer.line_count();
    if state.redo() {
        let after = state.buffer.line_count();
        tracing::trace!(target: "actions.dispatch", op = "redo", buffer_changed = (before != after), "redo");
        if before != after {
            DispatchResult::buffer_replaced()
        } else {
            DispatchResult::dirty()
        }
    } else {
        DispatchResult::clean()
    }
}
