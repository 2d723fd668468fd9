//! Inline-span recognition.
//!
//! Spans are recognized left-to-right with a fixed precedence: code spans
//! first (their content is never parsed further), then links, then triple,
//! double, and single emphasis, then bare-URL autolinks.  Nested emphasis is
//! handled by recursive descent on the delimited text.  A delimiter with no
//! valid closer degrades to literal text; only the scanners module ever
//! rejects a whole input.
//!
//! Link labels are parsed with link and autolink recognition suppressed, so
//! an anchor can never nest inside another anchor.

use crate::nodes::{InlineSpan, NodeLink};
use crate::parser::options::Options;
use crate::parser::RefMap;
use crate::strings;

/// Entry point for a block's text content.  Applies the `disable_emphasis`
/// transform once, before recognition; recursion below goes straight to
/// [`parse_spans`].
pub(crate) fn parse_inlines(text: &str, refmap: &RefMap, options: &Options) -> Vec<InlineSpan> {
    if options.disable_emphasis {
        parse_spans(&strip_emphasis(text), refmap)
    } else {
        parse_spans(text, refmap)
    }
}

/// Removes emphasis delimiters outright.  Triples go first so `***x***`
/// doesn't leave stray singles behind.
fn strip_emphasis(text: &str) -> String {
    let mut s = text.to_string();
    for delim in ["***", "___", "**", "__", "*", "_"] {
        if s.contains(delim) {
            s = s.replace(delim, "");
        }
    }
    s
}

pub(crate) fn parse_spans(text: &str, refmap: &RefMap) -> Vec<InlineSpan> {
    parse_with(text, refmap, false)
}

/// Label text: emphasis and code spans apply, links and autolinks do not.
fn parse_label(text: &str, refmap: &RefMap) -> Vec<InlineSpan> {
    parse_with(text, refmap, true)
}

fn parse_with(text: &str, refmap: &RefMap, in_label: bool) -> Vec<InlineSpan> {
    Subject {
        input: text,
        pos: 0,
        refmap,
        spans: vec![],
        literal: String::new(),
        in_label,
    }
    .parse_all()
}

/// One inline parse in progress over a block's text.
struct Subject<'a> {
    input: &'a str,
    pos: usize,
    refmap: &'a RefMap,
    spans: Vec<InlineSpan>,
    literal: String,
    in_label: bool,
}

/// Bytes that can begin a non-text span.  `h`/`f` are the autolink scheme
/// heads; everything between two specials is copied as literal text in one
/// move.
fn find_special(data: &[u8]) -> Option<usize> {
    jetscii::bytes!(b'`', b'[', b'*', b'_', b'\n', b'h', b'f').find(data)
}

impl<'a> Subject<'a> {
    fn parse_all(mut self) -> Vec<InlineSpan> {
        while self.pos < self.input.len() {
            let rest = &self.input.as_bytes()[self.pos..];
            match find_special(rest) {
                None => {
                    let end = self.input.len();
                    self.push_literal(self.pos, end);
                    self.pos = end;
                }
                Some(0) => self.handle_special(),
                Some(off) => {
                    let end = self.pos + off;
                    self.push_literal(self.pos, end);
                    self.pos = end;
                }
            }
        }
        self.flush();
        self.spans
    }

    fn handle_special(&mut self) {
        match self.input.as_bytes()[self.pos] {
            b'\n' => {
                self.flush();
                self.spans.push(InlineSpan::SoftBreak);
                self.pos += 1;
            }
            b'`' => self.handle_backticks(),
            b'[' | b'h' | b'f' if self.in_label => {
                let end = self.pos + 1;
                self.push_literal(self.pos, end);
                self.pos = end;
            }
            b'[' => self.handle_bracket(),
            b'*' => self.handle_emphasis(b'*'),
            b'_' => self.handle_emphasis(b'_'),
            b'h' | b'f' => self.handle_autolink(),
            _ => unreachable!("find_special reported a byte we don't handle"),
        }
    }

    fn push_literal(&mut self, from: usize, to: usize) {
        self.literal.push_str(&self.input[from..to]);
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            let text = std::mem::take(&mut self.literal);
            self.spans.push(InlineSpan::Text(text));
        }
    }

    fn run_len(&self, delim: u8) -> usize {
        self.input.as_bytes()[self.pos..]
            .iter()
            .take_while(|&&b| b == delim)
            .count()
    }

    fn handle_backticks(&mut self) {
        let bytes = self.input.as_bytes();
        let run = self.run_len(b'`');

        match scan_to_closing_backticks(bytes, self.pos + run, run) {
            Some(close) => {
                let content = &self.input[self.pos + run..close];
                self.flush();
                self.spans
                    .push(InlineSpan::Code(strings::normalize_code(content)));
                self.pos = close + run;
            }
            None => {
                let end = self.pos + run;
                self.push_literal(self.pos, end);
                self.pos = end;
            }
        }
    }

    fn handle_bracket(&mut self) {
        match self.scan_link() {
            Some((span, end)) => {
                self.flush();
                self.spans.push(span);
                self.pos = end;
            }
            None => {
                self.literal.push('[');
                self.pos += 1;
            }
        }
    }

    /// Attempts `[label](url "title")`, `[label][ref]`, or `[label][]` at the
    /// current position.  Returns the span and the position just past it.
    fn scan_link(&self) -> Option<(InlineSpan, usize)> {
        let bytes = self.input.as_bytes();
        let label_end = matching_delimiter(bytes, self.pos, b'[', b']')?;
        let label = &self.input[self.pos + 1..label_end];

        let next = label_end + 1;
        match bytes.get(next) {
            Some(b'(') => {
                let close = matching_delimiter(bytes, next, b'(', b')')?;
                let (url, title) = split_url_title(&self.input[next + 1..close]);
                let link = NodeLink {
                    url: url.to_string(),
                    title,
                };
                Some((
                    InlineSpan::Link(link, parse_label(label, self.refmap)),
                    close + 1,
                ))
            }
            Some(b'[') => {
                let ref_end = next + 1 + self.input[next + 1..].find(']')?;
                let name = &self.input[next + 1..ref_end];
                let key = strings::normalize_label(if name.is_empty() { label } else { name });
                let reference = self.refmap.get(&key)?;
                let link = NodeLink {
                    url: reference.url.clone(),
                    title: reference.title.clone(),
                };
                Some((
                    InlineSpan::Link(link, parse_label(label, self.refmap)),
                    ref_end + 1,
                ))
            }
            _ => None,
        }
    }

    fn handle_emphasis(&mut self, delim: u8) {
        let bytes = self.input.as_bytes();
        let run = self.run_len(delim);

        // Intra-word underscores never delimit emphasis.
        if delim == b'_' {
            let before_alnum = self.pos > 0 && bytes[self.pos - 1].is_ascii_alphanumeric();
            let after_alnum = bytes
                .get(self.pos + run)
                .map_or(false, |b| b.is_ascii_alphanumeric());
            if before_alnum && after_alnum {
                let end = self.pos + run;
                self.push_literal(self.pos, end);
                self.pos = end;
                return;
            }
        }

        let widest = run.min(3);
        for width in (1..=widest).rev() {
            if let Some(close) = find_closing_run(bytes, self.pos + width, delim, width) {
                if close == self.pos + width {
                    continue;
                }
                let content = &self.input[self.pos + width..close];
                let children = parse_with(content, self.refmap, self.in_label);
                let span = match width {
                    3 => InlineSpan::BoldItalic(children),
                    2 => InlineSpan::Bold(children),
                    _ => InlineSpan::Italic(children),
                };
                self.flush();
                self.spans.push(span);
                self.pos = close + width;
                return;
            }
        }

        let end = self.pos + run;
        self.push_literal(self.pos, end);
        self.pos = end;
    }

    fn handle_autolink(&mut self) {
        let bytes = self.input.as_bytes();
        let rest = &self.input[self.pos..];

        let at_boundary = self.pos == 0 || !bytes[self.pos - 1].is_ascii_alphanumeric();
        let scheme_len = ["https://", "http://", "ftp://"]
            .iter()
            .find(|s| rest.starts_with(**s))
            .map(|s| s.len());

        let scheme_len = match (at_boundary, scheme_len) {
            (true, Some(n)) => n,
            _ => {
                // Just an ordinary `h` or `f`.
                let end = self.pos + 1;
                self.push_literal(self.pos, end);
                self.pos = end;
                return;
            }
        };

        let mut end = self.pos + scheme_len;
        while end < bytes.len() && !bytes[end].is_ascii_whitespace() && bytes[end] != b'<' {
            end += 1;
        }
        end = trim_autolink_end(bytes, self.pos, end);

        if end <= self.pos + scheme_len {
            let skip = self.pos + scheme_len;
            self.push_literal(self.pos, skip);
            self.pos = skip;
            return;
        }

        let url = self.input[self.pos..end].to_string();
        self.flush();
        self.spans.push(InlineSpan::AutoLink(url));
        self.pos = end;
    }
}

/// Finds the next run of exactly `n` backticks, returning its start.
fn scan_to_closing_backticks(bytes: &[u8], mut i: usize, n: usize) -> Option<usize> {
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            if i - start == n {
                return Some(start);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Finds the matching `close` for the `open` delimiter at `open_at`,
/// counting nested pairs.
fn matching_delimiter(bytes: &[u8], open_at: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open_at + 1;
    while i < bytes.len() {
        let b = bytes[i];
        if b == open {
            depth += 1;
        } else if b == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
        i += 1;
    }
    None
}

/// Finds a closing run of exactly `width` `delim` bytes with a non-space
/// character before it, returning the run's start.
fn find_closing_run(bytes: &[u8], mut i: usize, delim: u8, width: usize) -> Option<usize> {
    while i < bytes.len() {
        if bytes[i] == delim {
            let start = i;
            while i < bytes.len() && bytes[i] == delim {
                i += 1;
            }
            let closes = i - start == width
                && start > 0
                && !bytes[start - 1].is_ascii_whitespace()
                && bytes[start - 1] != delim;
            if closes {
                return Some(start);
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Splits the inside of `(...)` — or a reference definition's remainder —
/// into a URL and an optional quoted title.
pub(crate) fn split_url_title(inner: &str) -> (&str, Option<String>) {
    let inner = inner.trim();

    for quote in ['"', '\''] {
        if inner.len() >= 2 && inner.ends_with(quote) {
            if let Some(open) = inner[..inner.len() - 1].rfind(quote) {
                let before = &inner[..open];
                if open > 0 && before.ends_with(char::is_whitespace) {
                    let title = inner[open + 1..inner.len() - 1].to_string();
                    return (before.trim_end(), Some(title));
                }
            }
        }
    }

    (inner, None)
}

/// Backs the autolink end off trailing punctuation and unbalanced closing
/// parens, so `(see http://x.test/a).` links `http://x.test/a`.
fn trim_autolink_end(bytes: &[u8], start: usize, mut end: usize) -> usize {
    while end > start {
        let c = bytes[end - 1];
        match c {
            b'?' | b'!' | b'.' | b',' | b':' | b';' | b'*' | b'_' | b'~' | b'\'' | b'"' => {
                end -= 1;
            }
            b')' => {
                let mut opening = 0;
                let mut closing = 0;
                for &b in &bytes[start..end] {
                    if b == b'(' {
                        opening += 1;
                    } else if b == b')' {
                        closing += 1;
                    }
                }
                if closing <= opening {
                    break;
                }
                end -= 1;
            }
            _ => break,
        }
    }
    end
}
