//! Substring find and replace over the joined logical text.
//!
//! Searching works on char offsets so results can flow straight into the
//! locator. Case-insensitive mode folds both haystack and needle through a
//! one-char-per-char lowercase map: taking only the first char of a
//! multi-char lowering keeps char offsets in the folded text aligned with
//! the original, which is what makes fold-space matches addressable in the
//! buffer.
//!
//! `find_next` starts at the cursor (the selection's active end — after a
//! hit that is the match end, so repeated finds walk forward) and wraps
//! around the document boundary exactly once. `replace_one` edits through
//! the reflowing buffer primitives so a multi-line replacement wraps exactly
//! as if it had been typed; `replace_all` instead rebuilds the whole buffer
//! from the substituted logical text under a single snapshot, so one undo
//! reverts the entire pass.

use core_state::EditorState;
use core_text::{charcol, locate, wrap};
use tracing::{debug, trace};

/// Lowercase fold preserving char count (1:1 per char).
fn fold_case(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Char offset of the first match at or after `from` (char offset), or
/// `None`.
fn find_from(hay: &str, needle: &str, from: usize) -> Option<usize> {
    let byte = charcol::byte_index(hay, from);
    hay[byte..]
        .find(needle)
        .map(|b| from + charcol::len(&hay[byte..byte + b]))
}

/// Char offset of the last match starting within `[from, before)`.
fn rfind_within(hay: &str, needle: &str, from: usize, before: usize) -> Option<usize> {
    let a = charcol::byte_index(hay, from);
    let b = charcol::byte_index(hay, before);
    hay[a..b]
        .rfind(needle)
        .map(|off| from + charcol::len(&hay[a..a + off]))
}

/// Find the next occurrence of `query`, select it (anchor at the match
/// start, cursor at the match end) and return true. Wraps around the
/// document boundary once; returns false when the document holds no match.
pub fn find_next(state: &mut EditorState, query: &str, forward: bool, case_sensitive: bool) -> bool {
    if query.is_empty() {
        return false;
    }
    let full = state.buffer.text();
    let (hay, needle) = if case_sensitive {
        (full, query.to_string())
    } else {
        (fold_case(&full), fold_case(query))
    };
    let total = charcol::len(&hay);
    let cur = locate::offset_for(&state.buffer, state.cursor).min(total);

    let start = if forward {
        match find_from(&hay, &needle, cur) {
            Some(at) => Some(at),
            None if cur > 0 => find_from(&hay, &needle, 0),
            None => None,
        }
    } else {
        match rfind_within(&hay, &needle, 0, cur) {
            Some(at) => Some(at),
            None if cur < total => rfind_within(&hay, &needle, cur, total),
            None => None,
        }
    };

    let Some(at) = start else {
        debug!(target: "search", query_chars = charcol::len(query), forward, "no_match");
        return false;
    };
    let end = at + charcol::len(&needle);
    state.anchor = locate::position_for_offset(&state.buffer, at);
    state.cursor = locate::position_for_offset(&state.buffer, end);
    trace!(
        target: "search",
        at,
        end,
        forward,
        case_sensitive,
        "match_selected"
    );
    true
}

/// Replace the currently selected match and advance to the next one. When
/// the selection does not equal the query (under the active folding) this
/// only advances. Returns whether a further match is selected.
pub fn replace_one(
    state: &mut EditorState,
    query: &str,
    replacement: &str,
    case_sensitive: bool,
) -> bool {
    if query.is_empty() {
        return false;
    }
    let selected = state.selected_text();
    let matches = if case_sensitive {
        selected == query
    } else {
        fold_case(&selected) == fold_case(query)
    };
    if !matches {
        return find_next(state, query, true, case_sensitive);
    }

    state.snapshot();
    let span = state.selection_span();
    state.cursor = state.buffer.remove_span(span);
    let cols = state.cols();
    // Replay the replacement as if typed so reflow applies per char;
    // embedded newlines become real line splits.
    let mut buf = [0u8; 4];
    for ch in replacement.chars() {
        if ch == '\n' {
            state.buffer.split_line(&mut state.cursor);
        } else {
            let s = ch.encode_utf8(&mut buf);
            state.buffer.insert_text(&mut state.cursor, s, cols);
        }
    }
    state.collapse_selection();
    state.dirty = true;
    debug!(
        target: "search",
        replaced_chars = charcol::len(query),
        with_chars = charcol::len(replacement),
        "replace_one"
    );
    find_next(state, query, true, case_sensitive)
}

/// Substitute every non-overlapping occurrence left to right and rebuild the
/// buffer once, under a single history snapshot. Returns the number of
/// replacements (zero leaves the state untouched).
pub fn replace_all(
    state: &mut EditorState,
    query: &str,
    replacement: &str,
    case_sensitive: bool,
) -> usize {
    if query.is_empty() {
        return 0;
    }
    let full = state.buffer.text();
    let (hay, needle) = if case_sensitive {
        (full.clone(), query.to_string())
    } else {
        (fold_case(&full), fold_case(query))
    };

    // Walk haystack and original in lockstep; folding is 1:1 per char, so
    // equal char counts name the same place even when byte lengths differ.
    let mut out = String::with_capacity(full.len());
    let mut count = 0usize;
    let mut hay_rest = hay.as_str();
    let mut full_rest = full.as_str();
    while let Some(found) = hay_rest.find(&needle) {
        let chars_before = charcol::len(&hay_rest[..found]);
        let match_chars = charcol::len(&needle);
        let keep = charcol::byte_index(full_rest, chars_before);
        let skip = charcol::byte_index(full_rest, chars_before + match_chars);
        out.push_str(&full_rest[..keep]);
        out.push_str(replacement);
        full_rest = &full_rest[skip..];
        hay_rest = &hay_rest[found + needle.len()..];
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    out.push_str(full_rest);

    let cols = state.cols();
    state.snapshot();
    state
        .buffer
        .set_lines(wrap::wrap_long_lines(out.split('\n'), cols));
    state.cursor = core_text::Position::origin();
    state.collapse_selection();
    state.dirty = true;
    debug!(target: "search", count, "replace_all");
    count
}
