//! Word-wrap policy: the one place break decisions are made.
//!
//! Both the incremental reflow in [`Buffer::insert_text`](crate::Buffer::insert_text)
//! and the bulk rebuild paths (load, paste, replace-all) call
//! [`break_point`], so a line can never wrap differently depending on which
//! path touched it.
//!
//! The break rule: cut at the last space at or before the wrap column; when
//! the first `cols + 1` chars contain no space past index 0, cut hard at the
//! wrap column (mid-word). The kept piece is right-trimmed and the remainder
//! left-trimmed, so wrap-introduced breaks eat the whitespace they replace.

use crate::charcol;

/// Maximum chars per physical line.
pub const COLS: usize = 80;

/// Soft-tab stop. Only callers use this (to compute how many spaces a Tab
/// inserts); the wrap policy itself never consults it.
pub const TAB: usize = 8;

/// The char index to break an over-long line at, or `None` when the line
/// already fits within `cols`.
pub fn break_point(line: &str, cols: usize) -> Option<usize> {
    let mut len = 0usize;
    let mut last_space = None;
    for (i, ch) in line.chars().enumerate() {
        len += 1;
        if i <= cols && ch == ' ' {
            last_space = Some(i);
        }
        if len > cols + 1 {
            // Already past the window and provably over-long; stop scanning.
            break;
        }
    }
    if len <= cols {
        return None;
    }
    match last_space {
        Some(i) if i > 0 => Some(i),
        _ => Some(cols),
    }
}

/// Wrap logical lines (each may exceed `cols`, e.g. freshly loaded file
/// content) into physical lines. Empty input lines are preserved — they are
/// paragraph breaks, never dropped. An empty overall result becomes a single
/// empty line, upholding the buffer's non-empty invariant.
pub fn wrap_long_lines<I, S>(raw_lines: I, cols: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for raw in raw_lines {
        let raw = raw.as_ref();
        if raw.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut rest = raw.to_string();
        loop {
            if rest.is_empty() {
                break;
            }
            let Some(cut) = break_point(&rest, cols) else {
                out.push(rest);
                break;
            };
            let byte = charcol::byte_index(&rest, cut);
            out.push(rest[..byte].trim_end().to_string());
            rest = rest[byte..].trim_start().to_string();
        }
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}
