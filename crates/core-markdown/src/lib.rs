//! Markdown preview rendering: logical text in, HTML fragment out.
//!
//! The core's share of the preview feature is only this conversion — a pure
//! string transformation the host can pipe into whatever surface it owns
//! (webview, pane, export). No styling, no document chrome; hosts wrap the
//! fragment in their own shell.

use pulldown_cmark::{Options, Parser, html};

/// Convert Markdown text to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let options =
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
