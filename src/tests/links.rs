use super::*;

#[test]
fn inline_link() {
    html("[x](/a)", "<p><a href=\"/a\">x</a></p>");
}

#[test]
fn inline_link_with_title() {
    html(
        "[x](/a \"A title\")",
        "<p><a href=\"/a\" title=\"A title\">x</a></p>",
    );
}

#[test]
fn link_label_is_inline_parsed() {
    html(
        "[**bold** label](/a)",
        "<p><a href=\"/a\"><strong>bold</strong> label</a></p>",
    );
}

#[test]
fn reference_link() {
    html(
        "See [docs][api].\n\n[api]: https://example.com/api",
        "<p>See <a href=\"https://example.com/api\">docs</a>.</p>",
    );
}

#[test]
fn reference_definitions_may_precede_use() {
    html(
        "[api]: /x \"Docs\"\n\nRead [the docs][api].",
        "<p>Read <a href=\"/x\" title=\"Docs\">the docs</a>.</p>",
    );
}

#[test]
fn collapsed_reference_uses_the_label() {
    html("[api][]\n\n[api]: /x", "<p><a href=\"/x\">api</a></p>");
}

#[test]
fn reference_labels_fold_case_and_whitespace() {
    html(
        "[x][The  Docs]\n\n[the docs]: /d",
        "<p><a href=\"/d\">x</a></p>",
    );
}

#[test]
fn unknown_reference_stays_literal() {
    html("[x][nope]", "<p>[x][nope]</p>");
}

#[test]
fn definition_only_input_still_produces_output() {
    html("[api]: /x", "<p></p>");
}

#[test]
fn labels_never_nest_anchors() {
    html(
        "[see http://a.test](/x)",
        "<p><a href=\"/x\">see http://a.test</a></p>",
    );
    html("[a [b](/c)](/x)", "<p><a href=\"/x\">a [b](/c)</a></p>");
}

#[test]
fn autolink() {
    html(
        "Visit http://example.com/a now",
        "<p>Visit <a href=\"http://example.com/a\">http://example.com/a</a> now</p>",
    );
}

#[test]
fn autolink_trims_trailing_punctuation() {
    html(
        "See https://x.test/a.",
        "<p>See <a href=\"https://x.test/a\">https://x.test/a</a>.</p>",
    );
    html(
        "(docs: http://x.test/a)",
        "<p>(docs: <a href=\"http://x.test/a\">http://x.test/a</a>)</p>",
    );
}

#[test]
fn bare_scheme_does_not_autolink() {
    html("http:// is a prefix", "<p>http:// is a prefix</p>");
}

#[test]
fn javascript_scheme_is_neutralized_but_preserved() {
    html(
        "[x](javascript:alert(1))",
        "<p><a href=\"javascript%3Aalert(1)\">x</a></p>",
    );
}

#[test]
fn scheme_neutralization_ignores_case() {
    let output = render("[x](JaVaScRiPt:alert(1))");
    assert!(output.contains("JaVaScRiPt%3A"));
    assert!(!output.contains("JaVaScRiPt:"));
}

#[test]
fn data_and_vbscript_uris_are_neutralized() {
    let output = render("[x](data:text/html;base64,PHNjcmlwdD4=)");
    assert!(output.contains("href=\"data%3A"));
    assert!(!output.contains("href=\"data:"));

    let output = render("[x](vbscript:msgbox)");
    assert!(output.contains("vbscript%3Amsgbox"));
}

#[test]
fn safe_schemes_pass_untouched() {
    html(
        "[a](http://x.test) [b](https://x.test) [c](ftp://x.test) [d](/rel)",
        "<p><a href=\"http://x.test\">a</a> <a href=\"https://x.test\">b</a> \
         <a href=\"ftp://x.test\">c</a> <a href=\"/rel\">d</a></p>",
    );
}

#[test]
fn href_attribute_bytes_are_encoded() {
    let output = render("[x](/a\"b)");
    assert!(output.contains("href=\"/a&#x22;b\""));
}
