use crate::{render, render_with_options, Options};

mod links;
mod malformed;
mod options;

#[track_caller]
fn html(input: &str, expected: &str) {
    let output = render(input);
    pretty_assertions::assert_eq!(output, expected);
}

#[track_caller]
fn html_opts<F>(input: &str, expected: &str, configure: F)
where
    F: Fn(&mut Options),
{
    let mut options = Options::default();
    configure(&mut options);
    let output = render_with_options(input, &options);
    pretty_assertions::assert_eq!(output, expected);
}

/// Strips every tag from rendered output, leaving text content as emitted
/// (entities included).
fn detag(output: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in output.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}
