use std::borrow::Cow;

/// Rewrites every `\r\n` and lone `\r` to `\n` so block-boundary detection
/// is platform-independent.  Borrows when the input is already normalized.
pub fn normalize_line_endings(s: &str) -> Cow<str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}

pub fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

pub fn is_space_or_tab(b: u8) -> bool {
    matches!(b, 9 | 32)
}

/// Case-folds a reference label and collapses internal whitespace, so
/// `[Docs]` and `[  docs ]` resolve to the same definition.
pub fn normalize_label(i: &str) -> String {
    let i = i.trim();

    let mut v = String::with_capacity(i.len());
    let mut last_was_whitespace = false;
    for c in i.chars() {
        for e in c.to_lowercase() {
            if e.is_whitespace() {
                if !last_was_whitespace {
                    last_was_whitespace = true;
                    v.push(' ');
                }
            } else {
                last_was_whitespace = false;
                v.push(e);
            }
        }
    }
    v
}

/// Collapses newlines in a code span to spaces and strips one surrounding
/// space pair, as long as the contents aren't space-only.
pub fn normalize_code(s: &str) -> String {
    let mut r = String::with_capacity(s.len());
    let mut contains_nonspace = false;

    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    r.push(' ');
                }
            }
            '\n' => r.push(' '),
            c => r.push(c),
        }
        if c != ' ' && c != '\r' && c != '\n' {
            contains_nonspace = true;
        }
    }

    if contains_nonspace && r.len() >= 2 && r.starts_with(' ') && r.ends_with(' ') {
        r[1..r.len() - 1].to_string()
    } else {
        r
    }
}
