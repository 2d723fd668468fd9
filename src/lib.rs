//! Renders user-authored Markdown task descriptions into HTML, guaranteeing
//! that no markup supplied by a user can execute as script — however
//! malformed, nested, or adversarial the input is.
//!
//! The pipeline is a pure function: normalize line endings, short-circuit
//! empty input, reject unmistakably hostile or unclosed input outright, then
//! parse blocks and inlines, highlight fenced code, and emit sanitized HTML.
//! Nothing is ever thrown to the caller; every failure mode degrades to the
//! whole input escaped inside a single `<p>`.
//!
//! ```
//! assert_eq!(taskdown::render("# Title"), "<h1>Title</h1>");
//! assert_eq!(taskdown::render("This is **bold** and *italic*"),
//!            "<p>This is <strong>bold</strong> and <em>italic</em></p>");
//! assert_eq!(taskdown::render("[x](javascript:alert(1))"),
//!            "<p><a href=\"javascript%3Aalert(1)\">x</a></p>");
//! ```
//!
//! The renderer holds no state between calls, so it is safe to use
//! concurrently from any number of threads.  The output is meant to be
//! inserted into a page as-is; callers must not re-escape it.

mod highlight;
mod html;
mod nodes;
mod parser;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

use std::panic;

use crate::nodes::Block;

pub use crate::parser::options::Options;

/// Renders Markdown to sanitized HTML with default options.
pub fn render(text: &str) -> String {
    render_with_options(text, &Options::default())
}

/// Renders Markdown to sanitized HTML.
///
/// Empty or whitespace-only input yields the empty string.  Input flagged by
/// the malformed-input heuristics — or containing a literal script fragment —
/// renders as one escaped paragraph without entering the structured parser.
/// Any internal failure degrades to that same fallback; this function never
/// panics through to the caller.
pub fn render_with_options(text: &str, options: &Options) -> String {
    let normalized = strings::normalize_line_endings(text);

    if normalized.trim().is_empty() {
        return String::new();
    }

    if scanners::contains_dangerous_html(text) || scanners::is_malformed(&normalized) {
        return fallback(&normalized);
    }

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let document = parser::parse(&normalized, options);
        html::format_document(&document, options)
    }));

    match result {
        Ok(output) => output,
        Err(_) => fallback(&normalized),
    }
}

/// The degraded all-or-nothing rendering: the whole input, escaped, in one
/// paragraph.  Shared by the malformed path and the containment path, so the
/// two are indistinguishable from outside.
fn fallback(normalized: &str) -> String {
    let document = [Block::RawFallback(html::escape_str(normalized.trim()))];
    html::format_document(&document, &Options::default())
}
