//! Block-level parsing.
//!
//! Grouping is line-based rather than a naive blank-line split, so fenced
//! code may contain blank lines and reference definitions can be consumed
//! wherever they appear.  Classification looks at each candidate's leading
//! pattern only; anything unrecognized is a paragraph, never an error.

pub mod inlines;
pub mod options;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::nodes::{Block, NodeCodeBlock, NodeHeading, NodeList};
use crate::parser::inlines::{parse_inlines, split_url_title};
use crate::parser::options::Options;
use crate::strings;

/// The reference-link table, keyed by normalized label.
pub(crate) type RefMap = FxHashMap<String, Reference>;

/// A resolved reference-link definition.
#[derive(Debug, Clone)]
pub(crate) struct Reference {
    pub url: String,
    pub title: Option<String>,
}

pub(crate) fn parse(text: &str, options: &Options) -> Vec<Block> {
    let prepared;
    let text = if options.disable_headings {
        prepared = strip_heading_markers(text);
        prepared.as_str()
    } else {
        text
    };

    let lines: Vec<&str> = text.lines().collect();
    let refmap = collect_references(&lines);
    let blocks = parse_blocks(&lines, &refmap, options);

    // Non-blank input always renders something, even when every line was
    // consumed (a stripped bare marker, a definition-only document).
    if blocks.is_empty() {
        return vec![Block::Paragraph(vec![])];
    }
    blocks
}

fn strip_heading_markers(text: &str) -> String {
    let mut in_fence = false;
    let stripped: Vec<&str> = text
        .lines()
        .map(|line| {
            if in_fence {
                if fence_close(line) {
                    in_fence = false;
                }
                return line;
            }
            if fence_open(line).is_some() {
                in_fence = true;
                return line;
            }
            match heading_marker(line) {
                Some((_, rest)) => rest,
                None => line,
            }
        })
        .collect();
    stripped.join("\n")
}

/// `#`×1–6 followed by a space (or end of line).  Seven or more hashes are
/// not a heading.
fn heading_marker(line: &str) -> Option<(u8, &str)> {
    let bytes = line.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    match bytes.get(hashes) {
        Some(b' ') | Some(b'\t') => Some((hashes as u8, line[hashes + 1..].trim())),
        None => Some((hashes as u8, "")),
        _ => None,
    }
}

/// The info string after an opening fence, trimmed.
fn fence_open(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix("```").map(str::trim)
}

fn fence_close(line: &str) -> bool {
    let t = line.trim();
    t.len() >= 3 && t.bytes().all(|b| b == b'`')
}

/// A full-line `[label]: url` or `[label]: url "title"` definition.
fn scan_reference(line: &str) -> Option<(String, Reference)> {
    let t = line.trim();
    if !t.starts_with('[') {
        return None;
    }
    let close = t.find(']')?;
    let label = &t[1..close];
    if label.trim().is_empty() || !t[close + 1..].starts_with(':') {
        return None;
    }
    let rest = t[close + 2..].trim();
    if rest.is_empty() {
        return None;
    }
    let (url, title) = split_url_title(rest);
    Some((
        strings::normalize_label(label),
        Reference {
            url: url.to_string(),
            title,
        },
    ))
}

/// First pass: collect every definition outside fenced code, so forward
/// references resolve.
fn collect_references(lines: &[&str]) -> RefMap {
    let mut refmap = RefMap::default();
    let mut in_fence = false;

    for line in lines {
        if in_fence {
            if fence_close(line) {
                in_fence = false;
            }
            continue;
        }
        if fence_open(line).is_some() {
            in_fence = true;
            continue;
        }
        if let Some((label, reference)) = scan_reference(line) {
            refmap.entry(label).or_insert(reference);
        }
    }

    refmap
}

fn indent_of(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count()
}

/// A bullet (`-`, `*`, `+`) or ordered (`1.`) marker with its content
/// offset.  Marker lines indented four or more columns are code, not lists.
fn list_marker(line: &str) -> Option<(bool, usize)> {
    let bytes = line.as_bytes();
    let indent = indent_of(line);
    if indent >= 4 {
        return None;
    }

    match bytes.get(indent) {
        Some(b'-') | Some(b'*') | Some(b'+') => match bytes.get(indent + 1) {
            Some(b' ') => Some((false, indent + 2)),
            _ => None,
        },
        Some(b'0'..=b'9') => {
            let mut j = indent;
            while matches!(bytes.get(j), Some(b'0'..=b'9')) {
                j += 1;
            }
            match (bytes.get(j), bytes.get(j + 1)) {
                (Some(b'.'), Some(b' ')) => Some((true, j + 2)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn interrupts_paragraph(line: &str) -> bool {
    strings::is_blank(line)
        || fence_open(line).is_some()
        || heading_marker(line).is_some()
        || list_marker(line).is_some()
        || scan_reference(line).is_some()
}

fn parse_blocks(lines: &[&str], refmap: &RefMap, options: &Options) -> Vec<Block> {
    let mut blocks = vec![];
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if strings::is_blank(line) || scan_reference(line).is_some() {
            i += 1;
            continue;
        }

        if let Some(info) = fence_open(line) {
            let language = info.split_whitespace().next().map(str::to_string);
            let mut literal = String::new();
            i += 1;
            while i < lines.len() && !fence_close(lines[i]) {
                literal.push_str(lines[i]);
                literal.push('\n');
                i += 1;
            }
            if i < lines.len() {
                i += 1;
            }
            blocks.push(Block::CodeBlock(NodeCodeBlock { language, literal }));
            continue;
        }

        if let Some((level, rest)) = heading_marker(line) {
            blocks.push(Block::Heading(NodeHeading {
                level,
                content: parse_inlines(rest, refmap, options),
            }));
            i += 1;
            continue;
        }

        if list_marker(line).is_some() {
            let start = i;
            while i < lines.len()
                && !strings::is_blank(lines[i])
                && (list_marker(lines[i]).is_some() || indent_of(lines[i]) >= 2)
            {
                i += 1;
            }
            blocks.push(parse_list(&lines[start..i], refmap, options));
            continue;
        }

        if indent_of(line) >= 4 {
            let start = i;
            while i < lines.len() && !strings::is_blank(lines[i]) && indent_of(lines[i]) >= 4 {
                i += 1;
            }
            let mut literal = String::new();
            for l in &lines[start..i] {
                literal.push_str(&l[4..]);
                literal.push('\n');
            }
            blocks.push(Block::CodeBlock(NodeCodeBlock {
                language: None,
                literal,
            }));
            continue;
        }

        let start = i;
        i += 1;
        while i < lines.len() && !interrupts_paragraph(lines[i]) {
            i += 1;
        }
        let text = lines[start..i].join("\n");
        blocks.push(Block::Paragraph(parse_inlines(&text, refmap, options)));
    }

    blocks
}

/// One marker line per item; continuation lines are dedented into the item
/// and either fold into its text or become a nested sub-list.
fn parse_list(lines: &[&str], refmap: &RefMap, options: &Options) -> Block {
    struct RawItem {
        text: String,
        children: SmallVec<[String; 4]>,
    }

    let mut ordered = false;
    let mut raw: Vec<RawItem> = vec![];

    for line in lines {
        if let Some((ord, content)) = list_marker(line) {
            if indent_of(line) < 2 || raw.is_empty() {
                if raw.is_empty() {
                    ordered = ord;
                }
                raw.push(RawItem {
                    text: line[content..].to_string(),
                    children: SmallVec::new(),
                });
                continue;
            }
        }

        if let Some(item) = raw.last_mut() {
            let dedented = if indent_of(line) >= 2 {
                &line[2..]
            } else {
                line.trim_start()
            };
            item.children.push(dedented.to_string());
        }
    }

    let items = raw
        .into_iter()
        .map(|mut item| {
            let child_refs: Vec<&str> = item.children.iter().map(String::as_str).collect();
            let nested_at = child_refs
                .iter()
                .position(|l| list_marker(l).is_some())
                .unwrap_or(child_refs.len());

            // Leading non-marker lines are lazy continuations of the item
            // text; the remainder is a sub-list.
            for l in &child_refs[..nested_at] {
                item.text.push('\n');
                item.text.push_str(l);
            }

            let mut item_blocks = vec![Block::Paragraph(parse_inlines(
                &item.text, refmap, options,
            ))];
            if nested_at < child_refs.len() {
                item_blocks.push(parse_list(&child_refs[nested_at..], refmap, options));
            }
            item_blocks
        })
        .collect();

    Block::List(NodeList { ordered, items })
}
