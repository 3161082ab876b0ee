//! Cursor movement and selection extension.
//!
//! Horizontal motion crosses row boundaries at line edges; vertical motion
//! clamps the column per destination line and deliberately keeps no sticky
//! column — moving through a short line and back does not restore the
//! original column. Page motions are plain repeated vertical steps.
//!
//! Every motion honors `extend`: extending moves only the cursor (active
//! end), leaving the anchor alone; a plain motion collapses the selection to
//! the destination *after* moving, so no phantom one-step selection trails
//! the cursor.

use crate::{DispatchResult, MotionKind};
use core_state::EditorState;
use tracing::trace;

pub(crate) fn handle_motion(
    kind: MotionKind,
    extend: bool,
    state: &mut EditorState,
) -> DispatchResult {
    let before_cursor = state.cursor;
    let before_anchor = state.anchor;
    match kind {
        MotionKind::Left => left(state),
        MotionKind::Right => right(state),
        MotionKind::Up => up(state),
        MotionKind::Down => down(state),
        MotionKind::LineStart => state.cursor.col = 0,
        MotionKind::LineEnd => state.cursor.col = state.buffer.line_len(state.cursor.row),
        MotionKind::DocStart => state.cursor = core_text::Position::origin(),
        MotionKind::DocEnd => state.cursor = state.buffer.end_position(),
        MotionKind::PageUp => {
            for _ in 0..state.page_lines() {
                up(state);
            }
        }
        MotionKind::PageDown => {
            for _ in 0..state.page_lines() {
                down(state);
            }
        }
    }
    if !extend {
        state.collapse_selection();
    }
    if state.cursor != before_cursor || state.anchor != before_anchor {
        trace!(
            target: "actions.dispatch",
            motion = ?kind,
            extend,
            row = before_cursor.row,
            col = before_cursor.col,
            to_row = state.cursor.row,
            to_col = state.cursor.col,
            "motion"
        );
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

fn left(state: &mut EditorState) {
    if state.cursor.col > 0 {
        state.cursor.col -= 1;
    } else if state.cursor.row > 0 {
        state.cursor.row -= 1;
        state.cursor.col = state.buffer.line_len(state.cursor.row);
    }
}

fn right(state: &mut EditorState) {
    if state.cursor.col < state.buffer.line_len(state.cursor.row) {
        state.cursor.col += 1;
    } else if state.cursor.row + 1 < state.buffer.line_count() {
        state.cursor.row += 1;
        state.cursor.col = 0;
    }
}

fn up(state: &mut EditorState) {
    if state.cursor.row > 0 {
        state.cursor.row -= 1;
        state.cursor.col = state.buffer.clamp_col(state.cursor.row, state.cursor.col);
    }
}

fn down(state: &mut EditorState) {
    if state.cursor.row + 1 < state.buffer.line_count() {
        state.cursor.row += 1;
        state.cursor.col = state.buffer.clamp_col(state.cursor.row, state.cursor.col);
    }
}
