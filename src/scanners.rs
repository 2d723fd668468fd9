//! Pattern scanning that decides whether input may enter the structured
//! parser at all.
//!
//! Both checks here are all-or-nothing: a positive result makes the renderer
//! emit the whole input as one escaped paragraph.  Mid-document oddities are
//! deliberately left to the parser's best-effort handling.

use crate::strings::{is_blank, is_space_or_tab};

/// Fast path for unmistakably hostile fragments: a literal `<script` tag or
/// an `onerror=` attribute anywhere in the raw input, in any case.  The
/// renderer's general escaping pass would neutralize these anyway; this
/// check exists so the guarantee doesn't rest on a single mechanism.
pub(crate) fn contains_dangerous_html(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.contains("<script") || lower.contains("onerror=")
}

/// Classifies input whose trailing emphasis or link delimiter is provably
/// unclosed.  Matching is decided by counting: an odd number of active
/// delimiter occurrences means the last one opened and nothing closed it.
/// Counting covers the trailing block only (the text after the last blank
/// line); an imbalance in an earlier block is left to the parser's
/// best-effort handling.
///
/// A delimiter run is "active" only if it could open or close emphasis at
/// all (some non-space neighbor).  This keeps list-marker stars (`* item`)
/// and free-standing stars (`2 * 3`... both neighbors spaces) out of the
/// count.  Intra-word underscores (`snake_case`) never delimit emphasis and
/// are skipped too.
pub(crate) fn is_malformed(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return false;
    }

    if let Some(open) = trimmed.rfind('[') {
        if !trimmed[open..].contains(']') {
            return true;
        }
    }

    let tail = trailing_block(trimmed);
    for delim in [b'*', b'_'] {
        let (doubles, singles) = count_active_delimiters(tail.as_bytes(), delim);
        if doubles % 2 == 1 || singles % 2 == 1 {
            return true;
        }
    }

    false
}

/// The text after the last blank line.
fn trailing_block(s: &str) -> &str {
    let mut start = 0;
    let mut offset = 0;
    for line in s.split_inclusive('\n') {
        offset += line.len();
        if is_blank(line.trim_end_matches('\n')) {
            start = offset;
        }
    }
    &s[start..]
}

/// Counts `**`-style and `*`-style occurrences of `delim`, as the number of
/// pairs and leftover singles across each active run.
fn count_active_delimiters(bytes: &[u8], delim: u8) -> (usize, usize) {
    let mut doubles = 0;
    let mut singles = 0;

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != delim {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i] == delim {
            i += 1;
        }
        let run = i - start;

        let before = if start == 0 { None } else { Some(bytes[start - 1]) };
        let after = bytes.get(i).copied();

        let can_open = matches!(after, Some(b) if !is_boundary(b));
        let can_close = matches!(before, Some(b) if !is_boundary(b));
        if !can_open && !can_close {
            continue;
        }
        if delim == b'_' {
            let word_internal = matches!(before, Some(b) if b.is_ascii_alphanumeric())
                && matches!(after, Some(b) if b.is_ascii_alphanumeric());
            if word_internal {
                continue;
            }
        }

        doubles += run / 2;
        singles += run % 2;
    }

    (doubles, singles)
}

fn is_boundary(b: u8) -> bool {
    is_space_or_tab(b) || b == b'\n'
}

#[cfg(test)]
pub mod tests {
    use super::{contains_dangerous_html, is_malformed};

    #[test]
    fn script_fragments_fire_in_any_case() {
        assert!(contains_dangerous_html("<script>alert(1)</script>"));
        assert!(contains_dangerous_html("x <ScRiPt src=a>"));
        assert!(contains_dangerous_html("<img onerror=alert(1)>"));
        assert!(contains_dangerous_html("<img ONERROR=x>"));
        assert!(!contains_dangerous_html("describe the onerror handler"));
        assert!(!contains_dangerous_html("&lt;script&gt;"));
    }

    #[test]
    fn unclosed_trailing_delimiters() {
        assert!(is_malformed("**unclosed bold text"));
        assert!(is_malformed("__unclosed bold"));
        assert!(is_malformed("some *italic"));
        assert!(is_malformed("a [link"));
        assert!(is_malformed("closed [a](b) then ["));
    }

    #[test]
    fn balanced_input_is_not_malformed() {
        assert!(!is_malformed("This is **bold** and *italic*"));
        assert!(!is_malformed("___all three___"));
        assert!(!is_malformed("[x](y) and [a][b]"));
        assert!(!is_malformed(""));
        assert!(!is_malformed("plain text"));
    }

    #[test]
    fn only_the_trailing_block_is_counted() {
        assert!(!is_malformed("I *really like this\n\nsecond paragraph"));
        assert!(!is_malformed("**oops\n\nall balanced here"));
        assert!(is_malformed("fine paragraph\n\n**unclosed here"));
        assert!(is_malformed("**unclosed bold text"));
    }

    #[test]
    fn markers_and_word_internals_do_not_count() {
        assert!(!is_malformed("* item one\n* item two"));
        assert!(!is_malformed("* single item"));
        assert!(!is_malformed("2 * 3 = 6"));
        assert!(!is_malformed("snake_case_name"));
        assert!(!is_malformed("array[0] = 1"));
    }
}
