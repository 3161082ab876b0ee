//! Offset ⇄ position conversion over the logical (joined) text.
//!
//! Offsets are char offsets into `buffer.text()`, counting one char per line
//! terminator. Bulk operations that rebuild the buffer (paste, replace-all)
//! use these to re-locate the cursor after reflow has moved every physical
//! line break.

use crate::{Buffer, Position, charcol, wrap};

/// Char offset of `pos` in the joined text.
pub fn offset_for(buffer: &Buffer, pos: Position) -> usize {
    let mut off = 0;
    for r in 0..pos.row.min(buffer.line_count()) {
        off += buffer.line_len(r) + 1;
    }
    off + pos.col
}

/// Inverse of [`offset_for`]; offsets past the end clamp to the last
/// position.
pub fn position_for_offset(buffer: &Buffer, offset: usize) -> Position {
    let mut off = 0;
    for r in 0..buffer.line_count() {
        let len = buffer.line_len(r);
        if offset <= off + len {
            return Position::new(r, (offset - off).min(len));
        }
        off += len + 1;
    }
    buffer.end_position()
}

/// Locate a char offset of the *logical* (pre-wrap) text within the physical
/// lines that text wraps into.
///
/// Each logical line is re-wrapped independently while accumulating the
/// physical row count; the target logical line's own wrap segments are then
/// walked to find the column. This leans on wrap decisions being local to a
/// single logical line, which the wrap policy guarantees (asserted by test,
/// not assumed silently).
pub fn unwrapped_offset_to_wrapped_pos<S>(logical: &[S], target: usize, cols: usize) -> Position
where
    S: AsRef<str>,
{
    if logical.is_empty() {
        return Position::origin();
    }
    let total: usize =
        logical.iter().map(|l| charcol::len(l.as_ref())).sum::<usize>() + logical.len() - 1;
    let clamped = target.min(total);

    // Which logical line, and which column inside it, the offset names.
    let mut line_idx = 0;
    let mut line_col = 0;
    let mut off = 0;
    for (r, ln) in logical.iter().enumerate() {
        let len = charcol::len(ln.as_ref());
        if clamped <= off + len {
            line_idx = r;
            line_col = (clamped - off).min(len);
            break;
        }
        off += len + 1;
    }
    if clamped >= total {
        line_idx = logical.len() - 1;
        line_col = charcol::len(logical[line_idx].as_ref());
    }

    // Walk the wrap segments, counting physical rows as we go.
    let mut out_row = 0;
    for (i, ln) in logical.iter().enumerate() {
        let segments = wrap::wrap_long_lines([ln.as_ref()], cols);
        if i == line_idx {
            let mut left = line_col;
            for (w, seg) in segments.iter().enumerate() {
                if left <= charcol::len(seg) {
                    return Position::new(out_row + w, left);
                }
                left -= charcol::len(seg);
            }
            let last = segments.len() - 1;
            return Position::new(out_row + last, charcol::len(&segments[last]));
        }
        out_row += segments.len();
    }
    Position::new(out_row, 0)
}
