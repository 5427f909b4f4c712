//! # CLI Module
//!
//! Command-line interface for the AI-image detector.
//!
//! ## Usage
//! ```bash
//! # Analyze an image
//! synthscan analyze photo.jpg
//!
//! # JSON output for scripting
//! synthscan analyze photo.jpg --output json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use std::fs;
use std::path::PathBuf;
use synthscan::core::analyzer::{AnalysisResult, Analyzer};
use synthscan::core::detectors::Category;
use synthscan::core::ingest;
use synthscan::error::{Result, SynthscanError};

/// Synthscan - Explain why an image looks generated or photographic
#[derive(Parser, Debug)]
#[command(name = "synthscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single image file
    Analyze {
        /// Path to the image
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    synthscan::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { path, output } => run_analyze(path, output),
    }
}

fn run_analyze(path: PathBuf, output: OutputFormat) -> Result<()> {
    let bytes = fs::read(&path).map_err(|source| SynthscanError::ReadFile {
        path: path.clone(),
        source,
    })?;

    let raw_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let filename = ingest::sanitize_filename(raw_name);

    ingest::validate_upload(&bytes, &filename)?;

    let analyzer = Analyzer::default();
    let result = analyzer.analyze(&bytes, &filename, bytes.len() as u64);

    match output {
        OutputFormat::Pretty => print_pretty_result(&filename, &result),
        OutputFormat::Json => print_json_result(&result)?,
    }

    Ok(())
}

fn print_pretty_result(filename: &str, result: &AnalysisResult) {
    let term = Term::stdout();

    term.write_line(&format!(
        "{} {}",
        style("Synthscan").bold().cyan(),
        style(filename).dim()
    ))
    .ok();
    term.write_line("").ok();

    let verdict = if result.synthetic_probability > 65.0 {
        style("Likely generated").red().bold()
    } else if result.synthetic_probability < 35.0 {
        style("Likely photographic").green().bold()
    } else {
        style("Inconclusive").yellow().bold()
    };

    term.write_line(&format!(
        "  {} ({:.0}% synthetic, {}% confidence)",
        verdict, result.synthetic_probability, result.confidence
    ))
    .ok();
    term.write_line("").ok();

    if result.findings.is_empty() {
        term.write_line("  No detector produced a finding.").ok();
    }

    for finding in &result.findings {
        let marker = match finding.category {
            Category::Critical => style("!!").red().bold(),
            Category::High => style("!").red(),
            Category::Warning => style("~").yellow(),
            Category::Good => style("+").green(),
            Category::Error => style("x").red().bold(),
        };
        term.write_line(&format!(
            "  {} {} {}",
            marker,
            style(&finding.title).bold(),
            style(format!("(weight {})", finding.weight)).dim()
        ))
        .ok();
        term.write_line(&format!("     {}", finding.explanation)).ok();
    }

    if !result.metadata.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("  {}", style("Metadata").bold())).ok();
        for (key, value) in &result.metadata {
            term.write_line(&format!("    {}: {}", style(key).dim(), value))
                .ok();
        }
    }
}

fn print_json_result(result: &AnalysisResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| SynthscanError::Output(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
