//! boldx CLI - bold text extraction from Word documents
//!
//! Prints the bold runs of a .docx file.

use boldx::render::{ExtractOptions, FormattedResult, ResultFormat, DEFAULT_SEPARATOR};
use clap::{Parser, ValueEnum};
use colored::*;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Extract bold text runs from a Word document
#[derive(Parser)]
#[command(
    name = "boldx",
    version,
    about = "Extract bold text from .docx documents",
    long_about = "boldx - prints the text of every bold run in a .docx document body.\n\n\
                  By default fragments are joined with a line-break pair and the\n\
                  result is wrapped with it at both ends."
)]
struct Cli {
    /// Input .docx file
    input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output scheme
    #[arg(long, default_value = "sep-string")]
    format: FormatMode,

    /// Separator placed between and around fragments
    #[arg(long, default_value = DEFAULT_SEPARATOR, hide_default_value = true)]
    separator: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON (no indentation)
    #[arg(long, requires = "json")]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Output scheme
#[derive(Clone, ValueEnum)]
enum FormatMode {
    /// Join fragments and wrap them with the separator
    SepString,
    /// One fragment per line
    Raw,
}

impl From<FormatMode> for ResultFormat {
    fn from(mode: FormatMode) -> Self {
        match mode {
            FormatMode::SepString => ResultFormat::SepString,
            FormatMode::Raw => ResultFormat::PassThrough,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ExtractOptions::new()
        .with_format(cli.format.into())
        .with_separator(cli.separator);

    let result = boldx::parse_with_options(&cli.input, &options)?;

    let rendered = if cli.json {
        if cli.compact {
            serde_json::to_string(&result)?
        } else {
            serde_json::to_string_pretty(&result)?
        }
    } else {
        render_text(result)
    };

    write_output(cli.output.as_ref(), &rendered)?;

    if let Some(path) = cli.output {
        eprintln!("{} Wrote bold text to {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

fn render_text(result: FormattedResult) -> String {
    match result {
        // The joined form already carries its own delimiters
        FormattedResult::Joined(s) => s,
        FormattedResult::Fragments(fragments) => {
            let mut out = String::new();
            for fragment in fragments {
                out.push_str(&fragment);
                out.push('\n');
            }
            out
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> io::Result<()> {
    match path {
        Some(p) => fs::write(p, content),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()
        }
    }
}
