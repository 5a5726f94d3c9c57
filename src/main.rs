use std::path::PathBuf;
use std::process::ExitCode;

use aspx::translation::Translator;
use aspx::translators::{Markup, Outline};
use aspx::Document;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per element with its classification and resolved control.
    Outline,
    /// The page rendered back to markup.
    Markup,
}

/// Classifies the tags of an ASP.NET page and prints the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Page file to classify.
    #[arg(short, long)]
    template: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Outline)]
    format: Format,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("Parsing file {}", args.template.display());

    let doc = match Document::load(&args.template) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let output = match args.format {
        Format::Outline => Outline::translate(&doc),
        Format::Markup => Markup::translate(&doc),
    };
    println!("{}", output);
    ExitCode::SUCCESS
}
