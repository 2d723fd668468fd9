//! The task-description document IR.
//!
//! A document is an ordered sequence of [`Block`]s; inline content is a
//! sequence of [`InlineSpan`]s.  Both are built fresh for every render call
//! and discarded on return.  The IR never crosses the crate boundary: the
//! renderer is the only consumer, and every consuming site matches
//! exhaustively so a new node kind is a compile-time-checked change.

/// The block-level node enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    /// **Block**.  An ATX-style heading, `#` through `######`.  Contains
    /// **inlines**.
    ///
    /// ``` md
    /// ## A heading
    /// ```
    Heading(NodeHeading),

    /// **Block**.  A paragraph.  Contains **inlines**.
    Paragraph(Vec<InlineSpan>),

    /// **Block**.  A bullet or ordered list.  Each item contains **blocks**:
    /// inline content first, then an optional nested sub-list.
    ///
    /// ``` md
    /// - An item
    ///   - A nested item
    /// ```
    List(NodeList),

    /// **Block**.  A fenced or indented code block.  Contains raw text which
    /// is never parsed as Markdown, although it is HTML escaped on output.
    CodeBlock(NodeCodeBlock),

    /// **Block**.  The entire input as one pre-escaped paragraph, produced
    /// when structured parsing is skipped.  Emitted verbatim inside `<p>`;
    /// nothing else ever appears next to it.
    RawFallback(String),
}

/// The heading's level and inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeHeading {
    /// The level of the heading; from 1 to 6.
    pub level: u8,

    /// The inline content of the heading text.
    pub content: Vec<InlineSpan>,
}

/// The metadata and items of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeList {
    /// Whether the list is ordered (`1.`) or bullet (`-`, `*`, `+`).
    pub ordered: bool,

    /// The list items, each an ordered sequence of blocks.
    pub items: Vec<Vec<Block>>,
}

/// The literal contents of a code block and its declared language, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeCodeBlock {
    /// The language token following the opening fence, if the block was
    /// fenced and an info string was given.  Indented code has none.
    pub language: Option<String>,

    /// The literal code body, untouched by inline parsing.
    pub literal: String,
}

/// The details of a link's destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeLink {
    /// The URL as written (inline) or as resolved from the reference table.
    /// Scheme validation happens at render time, without exception.
    pub url: String,

    /// The link title, if given.
    pub title: Option<String>,
}

/// The inline-level node enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InlineSpan {
    /// **Inline**.  Textual content.  All prose in a document ends up in a
    /// `Text` span, and every `Text` span is escaped on output.
    Text(String),

    /// **Inline**.  Strong emphasis, `**` or `__` delimited.
    Bold(Vec<InlineSpan>),

    /// **Inline**.  Emphasis, `*` or `_` delimited.
    Italic(Vec<InlineSpan>),

    /// **Inline**.  Strong emphasis and emphasis at once, `***` or `___`
    /// delimited.
    BoldItalic(Vec<InlineSpan>),

    /// **Inline**.  A code span.  Contents are never parsed further.
    Code(String),

    /// **Inline**.  A link with inline-parsed label text.
    Link(NodeLink, Vec<InlineSpan>),

    /// **Inline**.  A bare URL recognized in running text.
    AutoLink(String),

    /// **Inline**.  A single newline inside a paragraph.
    SoftBreak,
}
