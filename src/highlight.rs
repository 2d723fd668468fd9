//! Per-language highlighting of fenced code blocks.
//!
//! One generic single-pass lexer, parameterized by a small per-language
//! profile (keyword set, comment syntax, string quotes).  Recognized tokens
//! come out wrapped in `<span class="token kind">…</span>`; everything else
//! is escaped plain text.  The lexer consumes every input byte exactly once,
//! so stripping the spans from the output always reproduces the code body —
//! classification may be rough, the text never is.
//!
//! Unknown languages keep their `language-{lang}` class for downstream
//! styling but get no token markup.

use crate::html::escape_into;
use phf::phf_set;

struct Profile {
    keywords: &'static phf::Set<&'static str>,
    line_comment: &'static str,
    block_comment: Option<(&'static str, &'static str)>,
    quotes: &'static [u8],
}

static JS_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "async", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "export", "extends",
    "false", "finally", "for", "function", "if", "import", "in", "instanceof",
    "let", "new", "null", "of", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "yield",
};

static RUST_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "as", "async", "await", "break", "const", "continue", "crate", "dyn",
    "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in", "let",
    "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self",
    "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while",
};

static PYTHON_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "None", "nonlocal",
    "not", "or", "pass", "raise", "return", "True", "False", "try", "while",
    "with", "yield",
};

static C_FAMILY_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "bool", "break", "case", "char", "class", "const", "continue", "default",
    "defer", "delete", "do", "double", "else", "enum", "extern", "false",
    "float", "for", "func", "go", "goto", "if", "int", "interface", "long",
    "map", "namespace", "new", "nil", "package", "private", "protected",
    "public", "range", "return", "short", "signed", "sizeof", "static",
    "struct", "switch", "template", "this", "true", "typedef", "typename",
    "union", "unsigned", "using", "var", "virtual", "void", "volatile",
    "while",
};

static JS: Profile = Profile {
    keywords: &JS_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    quotes: b"\"'`",
};

static RUST: Profile = Profile {
    keywords: &RUST_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    quotes: b"\"",
};

static PYTHON: Profile = Profile {
    keywords: &PYTHON_KEYWORDS,
    line_comment: "#",
    block_comment: None,
    quotes: b"\"'",
};

static C_FAMILY: Profile = Profile {
    keywords: &C_FAMILY_KEYWORDS,
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    quotes: b"\"'",
};

fn profile_for(lang: &str) -> Option<&'static Profile> {
    match lang.to_ascii_lowercase().as_str() {
        "js" | "javascript" | "jsx" | "ts" | "typescript" | "tsx" => Some(&JS),
        "rust" | "rs" => Some(&RUST),
        "py" | "python" => Some(&PYTHON),
        "c" | "cpp" | "c++" | "h" | "java" | "go" => Some(&C_FAMILY),
        _ => None,
    }
}

/// Strips a declared language down to bytes that are inert inside a class
/// attribute.
fn clean_language(lang: &str) -> String {
    lang.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '#' | '-'))
        .collect()
}

/// Renders one code block as a complete `<pre><code>` fragment, already
/// escaped.  No language (or an unusable one) means plain escaped text;
/// a recognized language adds token markup on top of the same text.
pub(crate) fn highlight_code_block(language: Option<&str>, literal: &str) -> String {
    let lang = language.map(clean_language).filter(|l| !l.is_empty());

    let mut v: Vec<u8> = Vec::with_capacity(literal.len() + 64);
    match &lang {
        None => {
            v.extend_from_slice(b"<pre><code>");
        }
        Some(lang) => {
            v.extend_from_slice(b"<pre class=\"language-");
            v.extend_from_slice(lang.as_bytes());
            v.extend_from_slice(b"\"><code class=\"language-");
            v.extend_from_slice(lang.as_bytes());
            v.extend_from_slice(b"\">");
        }
    }

    match lang.as_deref().and_then(profile_for) {
        Some(profile) => tokenize_into(&mut v, literal, profile),
        None => escape_into(&mut v, literal.as_bytes()),
    }

    v.extend_from_slice(b"</code></pre>");
    String::from_utf8(v).unwrap()
}

fn emit_token(v: &mut Vec<u8>, kind: &str, text: &[u8]) {
    v.extend_from_slice(b"<span class=\"token ");
    v.extend_from_slice(kind.as_bytes());
    v.extend_from_slice(b"\">");
    escape_into(v, text);
    v.extend_from_slice(b"</span>");
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_operator(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'%' | b'=' | b'<' | b'>' | b'!' | b'&' | b'|' | b'^' | b'~'
    )
}

fn is_punctuation(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'{' | b'}' | b'[' | b']' | b',' | b';' | b':' | b'.')
}

fn tokenize_into(v: &mut Vec<u8>, code: &str, profile: &Profile) {
    let src = code.as_bytes();
    let len = src.len();
    let mut i = 0;
    // Unclassified bytes accumulate here and flush as bare escaped text.
    let mut plain_start = 0;

    macro_rules! flush_plain {
        ($upto:expr) => {
            if plain_start < $upto {
                escape_into(v, &src[plain_start..$upto]);
            }
        };
    }

    while i < len {
        let b = src[i];

        // Comments win over operators ("//" before "/").
        if src[i..].starts_with(profile.line_comment.as_bytes()) {
            flush_plain!(i);
            let end = memchr_newline(src, i);
            emit_token(v, "comment", &src[i..end]);
            i = end;
            plain_start = i;
            continue;
        }

        if let Some((open, close)) = profile.block_comment {
            if src[i..].starts_with(open.as_bytes()) {
                flush_plain!(i);
                let end = find_sub(src, i + open.len(), close.as_bytes())
                    .map(|at| at + close.len())
                    .unwrap_or(len);
                emit_token(v, "comment", &src[i..end]);
                i = end;
                plain_start = i;
                continue;
            }
        }

        if profile.quotes.contains(&b) {
            flush_plain!(i);
            let end = scan_string(src, i, b);
            emit_token(v, "string", &src[i..end]);
            i = end;
            plain_start = i;
            continue;
        }

        if b.is_ascii_digit() {
            flush_plain!(i);
            let mut end = i + 1;
            while end < len && (src[end].is_ascii_alphanumeric() || src[end] == b'.' || src[end] == b'_') {
                end += 1;
            }
            emit_token(v, "number", &src[i..end]);
            i = end;
            plain_start = i;
            continue;
        }

        if is_ident_start(b) {
            let mut end = i + 1;
            while end < len && is_ident(src[end]) {
                end += 1;
            }
            let word = &code[i..end];
            if profile.keywords.contains(word) {
                flush_plain!(i);
                emit_token(v, "keyword", &src[i..end]);
                plain_start = end;
            } else if src.get(end) == Some(&b'(') {
                flush_plain!(i);
                emit_token(v, "function", &src[i..end]);
                plain_start = end;
            }
            // Plain identifiers stay in the unclassified run.
            i = end;
            continue;
        }

        if is_operator(b) {
            flush_plain!(i);
            let mut end = i + 1;
            while end < len && is_operator(src[end]) {
                end += 1;
            }
            emit_token(v, "operator", &src[i..end]);
            i = end;
            plain_start = i;
            continue;
        }

        if is_punctuation(b) {
            flush_plain!(i);
            emit_token(v, "punctuation", &src[i..i + 1]);
            i += 1;
            plain_start = i;
            continue;
        }

        i += 1;
    }
    flush_plain!(len);
}

fn memchr_newline(src: &[u8], from: usize) -> usize {
    src[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| from + p)
        .unwrap_or(src.len())
}

fn find_sub(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from >= src.len() {
        return None;
    }
    src[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

/// Consumes a quoted string with backslash escapes, stopping at the closing
/// quote, an unescaped newline, or end of input.
fn scan_string(src: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < src.len() {
        match src[i] {
            b'\\' if i + 1 < src.len() => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

#[cfg(test)]
pub mod tests {
    use super::highlight_code_block;

    fn detag(html: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for c in html.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                c if !in_tag => out.push(c),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn no_language_is_plain_escaped() {
        let out = highlight_code_block(None, "let x = <y>;\n");
        assert_eq!(out, "<pre><code>let x = &lt;y&gt;;\n</code></pre>");
    }

    #[test]
    fn known_language_carries_classes_and_tokens() {
        let out = highlight_code_block(Some("js"), "let x = 1;\n");
        assert!(out.starts_with("<pre class=\"language-js\"><code class=\"language-js\">"));
        assert!(out.contains("<span class=\"token keyword\">let</span>"));
        assert!(out.contains("<span class=\"token number\">1</span>"));
    }

    #[test]
    fn unknown_language_keeps_class_without_tokens() {
        let out = highlight_code_block(Some("brainfuck"), "+[->+<]\n");
        assert!(out.contains("class=\"language-brainfuck\""));
        assert!(!out.contains("token"));
    }

    #[test]
    fn language_names_are_cleaned_for_the_class_attribute() {
        let out = highlight_code_block(Some("x\" onmouseover=\"evil"), "a\n");
        assert!(out.contains("class=\"language-xonmouseoverevil\""));
        assert!(!out.contains("onmouseover=\"evil"));
    }

    #[test]
    fn detagged_output_round_trips() {
        let code = "function greet(name) {\n  // say hi\n  return `hi ${name}`;\n}\n";
        let out = highlight_code_block(Some("js"), code);
        let inner = detag(&out);
        assert_eq!(inner, code);
    }

    #[test]
    fn round_trip_survives_strings_and_comments() {
        let code = "let s = \"a < b\"; /* done */\n";
        let out = highlight_code_block(Some("js"), code);
        assert_eq!(detag(&out).replace("&lt;", "<"), code);
    }
}
