use super::*;

#[test]
fn unclosed_bold_falls_back_to_an_escaped_paragraph() {
    html("**unclosed bold text", "<p>**unclosed bold text</p>");
    html("__unclosed bold", "<p>__unclosed bold</p>");
}

#[test]
fn unclosed_italic_falls_back() {
    html("some *italic", "<p>some *italic</p>");
    html("a _trailing", "<p>a _trailing</p>");
}

#[test]
fn trailing_open_bracket_falls_back() {
    html("pick one [", "<p>pick one [</p>");
    html("closed [a](b) then [", "<p>closed [a](b) then [</p>");
}

#[test]
fn fallback_is_all_or_nothing() {
    let output = render("**bad and [link](http://x)");
    assert_eq!(output, "<p>**bad and [link](http://x)</p>");
    assert!(!output.contains("<a"));
    assert!(!output.contains("<strong"));
}

#[test]
fn mid_document_imbalance_is_left_to_best_effort() {
    html(
        "I *really like this\n\nsecond paragraph",
        "<p>I *really like this</p><p>second paragraph</p>",
    );
}

#[test]
fn fallback_spans_the_whole_document() {
    html(
        "fine paragraph\n\n**unclosed here",
        "<p>fine paragraph\n\n**unclosed here</p>",
    );
}

#[test]
fn fallback_output_is_escaped() {
    html("**a < b", "<p>**a &lt; b</p>");
}

#[test]
fn balanced_delimiters_do_not_trip_the_detector() {
    html(
        "*ok* and **fine** and _good_",
        "<p><em>ok</em> and <strong>fine</strong> and <em>good</em></p>",
    );
}

#[test]
fn list_markers_and_arithmetic_stars_do_not_trip_it() {
    html("* one\n* two", "<ul><li>one</li><li>two</li></ul>");
    html("2 * 3 = 6", "<p>2 * 3 = 6</p>");
}

#[test]
fn intra_word_underscores_do_not_trip_it() {
    html("call snake_case_name here", "<p>call snake_case_name here</p>");
}
