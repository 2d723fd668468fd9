//! Configuration for the renderer.
//!
//! All toggles default to `false`, which means every feature is enabled and
//! everything HTML-looking is escaped — the safe default.  Options are read
//! per call; the renderer keeps no state between calls.

/// Render options for a single call.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Preserves a narrow allow-list of inline HTML already present in the
    /// input — emphasis tags only (`<em>`, `<strong>`, `<b>`, `<i>`), in
    /// open or close form, with no attributes.  Everything else is still
    /// escaped, whatever the nesting or case.
    ///
    /// ```rust
    /// # use taskdown::{render_with_options, Options};
    /// let mut options = Options::default();
    /// options.allow_safe_html = true;
    /// assert_eq!(render_with_options("Hello <em>world</em>.", &options),
    ///            "<p>Hello <em>world</em>.</p>");
    /// assert_eq!(render_with_options("Hello <em onclick=x>world</em>.", &options),
    ///            "<p>Hello &lt;em onclick=x&gt;world</em>.</p>");
    /// ```
    pub allow_safe_html: bool,

    /// Strips heading markers before block classification, so a line
    /// starting with `#` renders as a plain paragraph.
    ///
    /// ```rust
    /// # use taskdown::{render_with_options, Options};
    /// let mut options = Options::default();
    /// options.disable_headings = true;
    /// assert_eq!(render_with_options("# Title", &options), "<p>Title</p>");
    /// ```
    pub disable_headings: bool,

    /// Strips emphasis delimiters from text before inline parsing.  Triple
    /// delimiters go first so no stray singles are left behind.
    ///
    /// ```rust
    /// # use taskdown::{render_with_options, Options};
    /// let mut options = Options::default();
    /// options.disable_emphasis = true;
    /// assert_eq!(render_with_options("Hello ***big*** **bold** world.", &options),
    ///            "<p>Hello big bold world.</p>");
    /// ```
    pub disable_emphasis: bool,

    /// Renders single line breaks as hard breaks instead of merging them
    /// into the enclosing paragraph.
    ///
    /// ```rust
    /// # use taskdown::{render_with_options, Options};
    /// let mut options = Options::default();
    /// options.breaks_as_newlines = true;
    /// assert_eq!(render_with_options("Hello\nworld.", &options),
    ///            "<p>Hello<br />world.</p>");
    /// ```
    pub breaks_as_newlines: bool,
}
