use super::*;

#[test]
fn default_options_match_the_plain_entry_point() {
    let input = "# T\n\n**b** and [x](/a)";
    assert_eq!(render(input), render_with_options(input, &Options::default()));
}

#[test]
fn disable_headings_renders_heading_lines_as_paragraphs() {
    html_opts("# Title", "<p>Title</p>", |opts| opts.disable_headings = true);
    html_opts("## A\n\nbody", "<p>A</p><p>body</p>", |opts| {
        opts.disable_headings = true
    });
}

#[test]
fn disable_headings_keeps_inline_content() {
    html_opts(
        "# A **bold** title",
        "<p>A <strong>bold</strong> title</p>",
        |opts| opts.disable_headings = true,
    );
}

#[test]
fn disable_headings_leaves_code_fences_alone() {
    html_opts(
        "```\n# not a heading\n```",
        "<pre><code># not a heading\n</code></pre>",
        |opts| opts.disable_headings = true,
    );
}

#[test]
fn bare_marker_lines_still_produce_output() {
    html_opts("#", "<p></p>", |opts| opts.disable_headings = true);
    html_opts("##", "<p></p>", |opts| opts.disable_headings = true);
}

#[test]
fn disable_emphasis_strips_the_delimiters() {
    html_opts(
        "**bold** and *italic*",
        "<p>bold and italic</p>",
        |opts| opts.disable_emphasis = true,
    );
    html_opts("__x__ and _y_", "<p>x and y</p>", |opts| {
        opts.disable_emphasis = true
    });
}

#[test]
fn disable_emphasis_handles_triples() {
    html_opts("***both***", "<p>both</p>", |opts| {
        opts.disable_emphasis = true
    });
}

#[test]
fn hardbreaks_turn_soft_newlines_into_br() {
    html_opts("a\nb\n\nc", "<p>a<br />b</p><p>c</p>", |opts| {
        opts.breaks_as_newlines = true
    });
}

#[test]
fn hardbreaks_apply_inside_list_items() {
    html_opts("- a\n  b", "<ul><li>a<br />b</li></ul>", |opts| {
        opts.breaks_as_newlines = true
    });
}

#[test]
fn options_combine() {
    html_opts("# T\nnext", "<p>T<br />next</p>", |opts| {
        opts.disable_headings = true;
        opts.breaks_as_newlines = true;
    });
}
