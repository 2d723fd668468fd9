//! HTML output, with sanitization applied to every node without exception.
//!
//! All text reaches the output through [`escape_into`]; link destinations go
//! through the scheme allow-list and the href byte table.  Block tags are
//! emitted with no formatting whitespace between them, and nested lists sit
//! flush against their parent `<li>`.

use std::io::Write;

use crate::highlight;
use crate::nodes::{Block, InlineSpan};
use crate::parser::options::Options;

const fn character_set(chars: &[u8]) -> [bool; 256] {
    let mut a = [false; 256];
    let mut i = 0;
    while i < chars.len() {
        a[chars[i] as usize] = true;
        i += 1;
    }
    a
}

/// Bytes that pass through an href attribute unencoded.
static HREF_SAFE: [bool; 256] = character_set(
    b"-_.+!*'(),%#@?=;:/&$abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789",
);

/// The inline tags `allow_safe_html` preserves.  Emphasis only.
static SAFE_INLINE_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "em", "strong", "b", "i",
};

pub(crate) fn format_document(blocks: &[Block], options: &Options) -> String {
    let mut f = HtmlFormatter::new(options);
    f.format_blocks(blocks, false);
    String::from_utf8(f.v).unwrap()
}

/// Escapes into a fresh string; the fallback-paragraph path and tests use
/// this.
pub(crate) fn escape_str(s: &str) -> String {
    let mut v = Vec::with_capacity(s.len());
    escape_into(&mut v, s.as_bytes());
    String::from_utf8(v).unwrap()
}

/// Replaces the five HTML-significant bytes with entities, in one pass,
/// applied exactly once: an `&` that already begins a well-formed entity is
/// copied through verbatim, never re-escaped and never re-decoded.
pub(crate) fn escape_into(v: &mut Vec<u8>, src: &[u8]) {
    let mut i = 0;
    while i < src.len() {
        i += escape_one(v, src, i);
    }
}

fn escape_one(v: &mut Vec<u8>, src: &[u8], i: usize) -> usize {
    match src[i] {
        b'&' => {
            if let Some(len) = scan_entity(&src[i..]) {
                v.extend_from_slice(&src[i..i + len]);
                return len;
            }
            v.extend_from_slice(b"&amp;");
        }
        b'<' => v.extend_from_slice(b"&lt;"),
        b'>' => v.extend_from_slice(b"&gt;"),
        b'"' => v.extend_from_slice(b"&quot;"),
        b'\'' => v.extend_from_slice(b"&#39;"),
        c => v.push(c),
    }
    1
}

/// Length of a well-formed entity at the start of `src`: `&name;`,
/// `&#123;`, or `&#xAB;`.
fn scan_entity(src: &[u8]) -> Option<usize> {
    let mut i = 1;
    match src.get(i)? {
        b'#' => {
            i += 1;
            let hex = matches!(src.get(i), Some(b'x') | Some(b'X'));
            if hex {
                i += 1;
            }
            let digits = i;
            while i < src.len() && i - digits < 7 {
                let ok = if hex {
                    src[i].is_ascii_hexdigit()
                } else {
                    src[i].is_ascii_digit()
                };
                if !ok {
                    break;
                }
                i += 1;
            }
            if i == digits {
                return None;
            }
        }
        b'a'..=b'z' | b'A'..=b'Z' => {
            let start = i;
            while i < src.len() && i - start < 32 && src[i].is_ascii_alphanumeric() {
                i += 1;
            }
        }
        _ => return None,
    }
    if src.get(i) == Some(&b';') {
        Some(i + 1)
    } else {
        None
    }
}

/// Length of an allow-listed bare tag at the start of `src`: `<`, optional
/// `/`, letters, `>`.  Attributes disqualify; case does not matter.
fn scan_safe_tag(src: &[u8]) -> Option<usize> {
    let mut i = 1;
    if src.get(i) == Some(&b'/') {
        i += 1;
    }
    let start = i;
    while i < src.len() && src[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == start || src.get(i) != Some(&b'>') {
        return None;
    }
    let name = std::str::from_utf8(&src[start..i]).ok()?.to_ascii_lowercase();
    if SAFE_INLINE_TAGS.contains(name.as_str()) {
        Some(i + 1)
    } else {
        None
    }
}

/// Whether a destination may navigate: `http`, `https`, `ftp`, or a
/// scheme-less relative path.
fn is_safe_url(url: &str) -> bool {
    for (i, b) in url.bytes().enumerate() {
        match b {
            b':' => {
                let scheme = &url.as_bytes()[..i];
                return scheme.eq_ignore_ascii_case(b"http")
                    || scheme.eq_ignore_ascii_case(b"https")
                    || scheme.eq_ignore_ascii_case(b"ftp");
            }
            // A path, query, or fragment before any colon means no scheme.
            b'/' | b'?' | b'#' => return true,
            _ => {}
        }
    }
    true
}

struct HtmlFormatter<'o> {
    v: Vec<u8>,
    options: &'o Options,
}

impl<'o> Write for HtmlFormatter<'o> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.v.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.v.flush()
    }
}

impl<'o> HtmlFormatter<'o> {
    fn new(options: &'o Options) -> Self {
        HtmlFormatter {
            v: vec![],
            options,
        }
    }

    /// Escapes prose text, honoring the `allow_safe_html` tag allow-list.
    fn escape_text(&mut self, s: &str) {
        if !self.options.allow_safe_html {
            escape_into(&mut self.v, s.as_bytes());
            return;
        }

        let src = s.as_bytes();
        let mut i = 0;
        while i < src.len() {
            if src[i] == b'<' {
                if let Some(len) = scan_safe_tag(&src[i..]) {
                    self.v.extend_from_slice(&src[i..i + len]);
                    i += len;
                    continue;
                }
            }
            i += escape_one(&mut self.v, src, i);
        }
    }

    fn escape_href(&mut self, url: &str) {
        let src = url.as_bytes();
        let size = src.len();
        let mut i = 0;

        while i < size {
            let org = i;
            while i < size && HREF_SAFE[src[i] as usize] {
                i += 1;
            }

            if i > org {
                self.v.extend_from_slice(&src[org..i]);
            }

            if i >= size {
                break;
            }

            match src[i] {
                b'&' => self.v.extend_from_slice(b"&amp;"),
                b'\'' => self.v.extend_from_slice(b"&#x27;"),
                c => write!(self, "&#x{:x};", c).unwrap(),
            }

            i += 1;
        }
    }

    /// Emits a link destination.  Dangerous schemes keep their text but lose
    /// their power: every colon is percent-encoded, which turns the value
    /// into an inert relative reference.
    fn format_href(&mut self, url: &str) {
        if is_safe_url(url) {
            self.escape_href(url);
        } else {
            self.escape_href(&url.replace(':', "%3A"));
        }
    }

    fn format_blocks(&mut self, blocks: &[Block], tight: bool) {
        for block in blocks {
            self.format_block(block, tight);
        }
    }

    fn format_block(&mut self, block: &Block, tight: bool) {
        match block {
            Block::Heading(nch) => {
                write!(self, "<h{}>", nch.level).unwrap();
                self.format_inlines(&nch.content);
                write!(self, "</h{}>", nch.level).unwrap();
            }
            Block::Paragraph(content) => {
                if tight {
                    self.format_inlines(content);
                } else {
                    self.v.extend_from_slice(b"<p>");
                    self.format_inlines(content);
                    self.v.extend_from_slice(b"</p>");
                }
            }
            Block::List(nl) => {
                let tag: &[u8] = if nl.ordered { b"ol" } else { b"ul" };
                self.v.push(b'<');
                self.v.extend_from_slice(tag);
                self.v.push(b'>');
                for item in &nl.items {
                    self.v.extend_from_slice(b"<li>");
                    self.format_blocks(item, true);
                    self.v.extend_from_slice(b"</li>");
                }
                self.v.extend_from_slice(b"</");
                self.v.extend_from_slice(tag);
                self.v.push(b'>');
            }
            Block::CodeBlock(ncb) => {
                let fragment =
                    highlight::highlight_code_block(ncb.language.as_deref(), &ncb.literal);
                self.v.extend_from_slice(fragment.as_bytes());
            }
            Block::RawFallback(escaped) => {
                self.v.extend_from_slice(b"<p>");
                self.v.extend_from_slice(escaped.as_bytes());
                self.v.extend_from_slice(b"</p>");
            }
        }
    }

    fn format_inlines(&mut self, spans: &[InlineSpan]) {
        for span in spans {
            self.format_inline(span);
        }
    }

    fn format_inline(&mut self, span: &InlineSpan) {
        match span {
            InlineSpan::Text(literal) => {
                self.escape_text(literal);
            }
            InlineSpan::SoftBreak => {
                if self.options.breaks_as_newlines {
                    self.v.extend_from_slice(b"<br />");
                } else {
                    self.v.push(b'\n');
                }
            }
            InlineSpan::Code(literal) => {
                self.v.extend_from_slice(b"<code>");
                escape_into(&mut self.v, literal.as_bytes());
                self.v.extend_from_slice(b"</code>");
            }
            InlineSpan::Bold(children) => {
                self.v.extend_from_slice(b"<strong>");
                self.format_inlines(children);
                self.v.extend_from_slice(b"</strong>");
            }
            InlineSpan::Italic(children) => {
                self.v.extend_from_slice(b"<em>");
                self.format_inlines(children);
                self.v.extend_from_slice(b"</em>");
            }
            InlineSpan::BoldItalic(children) => {
                self.v.extend_from_slice(b"<strong><em>");
                self.format_inlines(children);
                self.v.extend_from_slice(b"</em></strong>");
            }
            InlineSpan::Link(nl, label) => {
                self.v.extend_from_slice(b"<a href=\"");
                self.format_href(&nl.url);
                if let Some(title) = &nl.title {
                    self.v.extend_from_slice(b"\" title=\"");
                    escape_into(&mut self.v, title.as_bytes());
                }
                self.v.extend_from_slice(b"\">");
                self.format_inlines(label);
                self.v.extend_from_slice(b"</a>");
            }
            InlineSpan::AutoLink(url) => {
                self.v.extend_from_slice(b"<a href=\"");
                self.format_href(url);
                self.v.extend_from_slice(b"\">");
                escape_into(&mut self.v, url.as_bytes());
                self.v.extend_from_slice(b"</a>");
            }
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::{escape_str, is_safe_url, scan_entity, scan_safe_tag};

    #[test]
    fn escaping_hits_all_five() {
        assert_eq!(escape_str("a & b < c > d \" e ' f"),
                   "a &amp; b &lt; c &gt; d &quot; e &#39; f");
    }

    #[test]
    fn existing_entities_pass_through_once() {
        assert_eq!(escape_str("&lt;script&gt;"), "&lt;script&gt;");
        assert_eq!(escape_str("&#39;&#x27;"), "&#39;&#x27;");
        assert_eq!(escape_str("&notanentity"), "&amp;notanentity");
        assert_eq!(escape_str("AT&T;"), "AT&T;");
    }

    #[test]
    fn entity_scanning() {
        assert_eq!(scan_entity(b"&amp; rest"), Some(5));
        assert_eq!(scan_entity(b"&#39;"), Some(5));
        assert_eq!(scan_entity(b"&#x1F600;"), Some(9));
        assert_eq!(scan_entity(b"&;"), None);
        assert_eq!(scan_entity(b"&#;"), None);
        assert_eq!(scan_entity(b"& spaced"), None);
    }

    #[test]
    fn safe_tag_scanning() {
        assert_eq!(scan_safe_tag(b"<em>x"), Some(4));
        assert_eq!(scan_safe_tag(b"</STRONG>"), Some(9));
        assert_eq!(scan_safe_tag(b"<b>"), Some(3));
        assert_eq!(scan_safe_tag(b"<em class=x>"), None);
        assert_eq!(scan_safe_tag(b"<div>"), None);
        assert_eq!(scan_safe_tag(b"<>"), None);
    }

    #[test]
    fn scheme_allow_list() {
        assert!(is_safe_url("http://example.com"));
        assert!(is_safe_url("HTTPS://example.com"));
        assert!(is_safe_url("ftp://example.com/f"));
        assert!(is_safe_url("/relative/path"));
        assert!(is_safe_url("relative.html"));
        assert!(is_safe_url("?query=1"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("JaVaScRiPt:alert(1)"));
        assert!(!is_safe_url("vbscript:msgbox"));
        assert!(!is_safe_url("data:text/html;base64,x"));
        assert!(!is_safe_url("unknown-scheme:payload"));
    }
}
