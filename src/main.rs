//! The `taskdown` binary.

use std::error::Error;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use taskdown::{render_with_options, Options};

#[derive(Debug, Parser)]
#[command(version, about = "Render Markdown task descriptions to sanitized HTML")]
struct Cli {
    /// The Markdown file(s) to render; or standard input if none passed.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Treat newlines as hard line breaks.
    #[arg(long)]
    hardbreaks: bool,

    /// Preserve allow-listed inline emphasis HTML already in the input.
    #[arg(long)]
    allow_safe_html: bool,

    /// Render heading lines as plain paragraphs.
    #[arg(long)]
    disable_headings: bool,

    /// Strip emphasis delimiters instead of rendering them.
    #[arg(long)]
    disable_emphasis: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("taskdown: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let options = Options {
        allow_safe_html: cli.allow_safe_html,
        disable_headings: cli.disable_headings,
        disable_emphasis: cli.disable_emphasis,
        breaks_as_newlines: cli.hardbreaks,
    };

    let mut input = String::new();
    if cli.files.is_empty() {
        std::io::stdin().read_to_string(&mut input)?;
    } else {
        for file in &cli.files {
            input.push_str(&fs::read_to_string(file)?);
        }
    }

    println!("{}", render_with_options(&input, &options));
    Ok(())
}
