//! Content mutation handlers.
//!
//! Selection semantics shared by the typed-input paths: an active selection
//! is removed first, inside the same undo unit as the edit that replaces it,
//! so "type over a selection" undoes as one step. Every handler snapshots
//! before the first mutation and skips the snapshot entirely when the call
//! is a no-op.
//!
//! Paste is the structural odd one out: rather than splicing line-locally it
//! rebuilds the logical text, rewraps it wholesale and relocates the cursor
//! through the unwrapped-offset locator, because pasted text can carry its
//! own newlines and push breaks arbitrarily far from the edit site.

use crate::DispatchResult;
use core_state::EditorState;
use core_text::{charcol, locate, wrap};
use tracing::trace;

use crate::EditKind;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    match kind {
        EditKind::InsertText(text) => insert_text(state, &text),
        EditKind::Newline => newline(state),
        EditKind::DeleteBackward => delete_backward(state),
        EditKind::DeleteForward => delete_forward(state),
        EditKind::DeleteSelection => delete_selection(state),
        EditKind::Paste(text) => paste(state, &text),
    }
}

fn insert_text(state: &mut EditorState, text: &str) -> DispatchResult {
    if text.is_empty() {
        return DispatchResult::clean();
    }
    let before = state.cursor;
    state.snapshot();
    if state.has_selection() {
        let span = state.selection_span();
        state.cursor = state.buffer.remove_span(span);
    }
    let cols = state.cols();
    state.buffer.insert_text(&mut state.cursor, text, cols);
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "insert_text",
        chars = charcol::len(text),
        row = before.row,
        col = before.col,
        to_row = state.cursor.row,
        to_col = state.cursor.col,
        "edit"
    );
    DispatchResult::dirty()
}

fn newline(state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    state.snapshot();
    if state.has_selection() {
        let span = state.selection_span();
        state.cursor = state.buffer.remove_span(span);
    }
    state.buffer.split_line(&mut state.cursor);
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "newline",
        row = before.row,
        col = before.col,
        "edit"
    );
    DispatchResult::dirty()
}

fn delete_backward(state: &mut EditorState) -> DispatchResult {
    if state.has_selection() {
        return delete_selection(state);
    }
    if state.cursor == core_text::Position::origin() {
        return DispatchResult::clean();
    }
    state.snapshot();
    let changed = state.buffer.delete_back(&mut state.cursor);
    debug_assert!(changed, "non-origin backward delete always changes content");
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "delete_backward",
        to_row = state.cursor.row,
        to_col = state.cursor.col,
        "edit"
    );
    DispatchResult::dirty()
}

fn delete_forward(state: &mut EditorState) -> DispatchResult {
    if state.has_selection() {
        return delete_selection(state);
    }
    if state.cursor == state.buffer.end_position() {
        return DispatchResult::clean();
    }
    state.snapshot();
    let changed = state.buffer.delete_forward(&state.cursor);
    debug_assert!(changed, "non-terminal forward delete always changes content");
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "delete_forward",
        row = state.cursor.row,
        col = state.cursor.col,
        "edit"
    );
    DispatchResult::dirty()
}

fn delete_selection(state: &mut EditorState) -> DispatchResult {
    if !state.has_selection() {
        return DispatchResult::clean();
    }
    state.snapshot();
    let span = state.selection_span();
    let multi_row = span.start.row != span.end.row;
    state.cursor = state.buffer.remove_span(span);
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "delete_selection",
        to_row = state.cursor.row,
        to_col = state.cursor.col,
        "edit"
    );
    if multi_row {
        DispatchResult::buffer_replaced()
    } else {
        DispatchResult::dirty()
    }
}

fn paste(state: &mut EditorState, text: &str) -> DispatchResult {
    if text.is_empty() {
        return DispatchResult::clean();
    }
    let span = state.selection_span();
    let full = state.buffer.text();
    let off_start = locate::offset_for(&state.buffer, span.start);
    let off_end = locate::offset_for(&state.buffer, span.end);
    let a = charcol::byte_index(&full, off_start);
    let b = charcol::byte_index(&full, off_end);
    let spliced = format!("{}{}{}", &full[..a], text, &full[b..]);

    let cols = state.cols();
    let raw: Vec<&str> = spliced.split('\n').collect();
    let wrapped = wrap::wrap_long_lines(raw.iter().copied(), cols);
    let target = off_start + charcol::len(text);
    let pos = locate::unwrapped_offset_to_wrapped_pos(&raw, target, cols);

    state.snapshot();
    state.buffer.set_lines(wrapped);
    state.cursor = pos;
    state.collapse_selection();
    state.dirty = true;
    trace!(
        target: "actions.dispatch",
        op = "paste",
        chars = charcol::len(text),
        to_row = state.cursor.row,
        to_col = state.cursor.col,
        "edit"
    );
    DispatchResult::buffer_replaced()
}
