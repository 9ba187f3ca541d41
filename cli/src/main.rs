//! docsift CLI - document outlines and persona-driven digests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docsift::render::{to_json, JsonFormat};
use docsift::source::{fragment_files, fragment_stem};
use docsift::{
    outline_from_file_with_mode, AnalyzeOptions, CollectionAnalyzer, CollectionInput, ErrorMode,
    JsonFragmentSource,
};

/// Collection input file looked for by `run`.
const COLLECTION_INPUT: &str = "challenge_input.json";
/// Collection result file written by `run`.
const COLLECTION_OUTPUT: &str = "challenge1b_output.json";

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Document outlines and persona-driven digests from PDF layout fragments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and heading outline from fragment dumps
    Outline {
        /// A <stem>.fragments.json file or a directory of them
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (stdout for a single file if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on dumps that cannot be read instead of writing an empty outline
        #[arg(long)]
        strict: bool,
    },

    /// Rank sections of a document collection for a persona and job
    #[command(alias = "rank")]
    Collection {
        /// Collection input JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Directory holding <stem>.fragments.json dumps (defaults to the input's directory)
        #[arg(short, long, value_name = "DIR")]
        fragments: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Abort on the first document that cannot be loaded
        #[arg(long)]
        strict: bool,
    },

    /// Pick collection mode if the input directory holds a collection input, outline mode otherwise
    Run {
        /// Input directory
        #[arg(long, env = "DOCSIFT_INPUT", default_value = "/app/input")]
        input: PathBuf,

        /// Output directory
        #[arg(long, env = "DOCSIFT_OUTPUT", default_value = "/app/output")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn error_mode(strict: bool) -> ErrorMode {
    if strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            strict,
        } => cmd_outline(
            &input,
            output.as_deref(),
            json_format(compact),
            error_mode(strict),
        ),
        Commands::Collection {
            input,
            fragments,
            output,
            compact,
            sequential,
            strict,
        } => {
            let options = AnalyzeOptions::new()
                .with_parallel(!sequential)
                .with_error_mode(error_mode(strict));
            cmd_collection(
                &input,
                fragments.as_deref(),
                output.as_deref(),
                json_format(compact),
                options,
            )
        }
        Commands::Run { input, output } => cmd_run(&input, &output),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    format: JsonFormat,
    mode: ErrorMode,
) -> Result<(), Box<dyn std::error::Error>> {
    if input.is_file() {
        let outline = outline_from_file_with_mode(input, mode)?;
        let json = to_json(&outline, format)?;
        match output {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let stem = fragment_stem(input).unwrap_or("outline");
                let path = dir.join(format!("{}.json", stem));
                fs::write(&path, &json)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => println!("{}", json),
        }
        return Ok(());
    }

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.to_path_buf());
    let written = outline_directory(input, &output_dir, format, mode)?;
    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        written,
        output_dir.display()
    );
    Ok(())
}

/// Write `<stem>.json` for every fragment dump in `input`, continuing past failures.
///
/// In lenient mode an unreadable dump still gets an (empty) outline file.
fn outline_directory(
    input: &Path,
    output_dir: &Path,
    format: JsonFormat,
    mode: ErrorMode,
) -> Result<usize, Box<dyn std::error::Error>> {
    let files = fragment_files(input)?;
    if files.is_empty() {
        println!(
            "{} no *.fragments.json files in {}",
            "Warning:".yellow(),
            input.display()
        );
        return Ok(0);
    }

    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = 0;
    for path in &files {
        let stem = fragment_stem(path).unwrap_or("outline");
        pb.set_message(stem.to_string());

        let result = outline_from_file_with_mode(path, mode)
            .and_then(|outline| to_json(&outline, format))
            .map_err(|e| e.to_string())
            .and_then(|json| {
                fs::write(output_dir.join(format!("{}.json", stem)), json).map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => written += 1,
            Err(e) => {
                log::warn!("Outline extraction failed for {}: {}", path.display(), e);
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    Ok(written)
}

fn cmd_collection(
    input: &Path,
    fragments: Option<&Path>,
    output: Option<&Path>,
    format: JsonFormat,
    options: AnalyzeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let fragments_dir = fragments
        .map(|p| p.to_path_buf())
        .or_else(|| input.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let data = fs::read_to_string(input)?;
    let collection = CollectionInput::from_json(&data)?;

    let analyzer = CollectionAnalyzer::new(Arc::new(JsonFragmentSource::new(&fragments_dir)))
        .with_options(options);
    let result = analyzer.analyze(&collection)?;
    let json = to_json(&result, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} sections, {} refined subsections",
            "Ranked".green(),
            result.extracted_sections.len(),
            result.subsection_analysis.len()
        );
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_run(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let collection_input = input.join(COLLECTION_INPUT);
    let is_collection = fs::read_to_string(&collection_input)
        .ok()
        .and_then(|data| serde_json::from_str::<serde_json::Value>(&data).ok())
        .is_some();
    log::debug!(
        "{} {} under {}",
        COLLECTION_INPUT,
        if is_collection { "found" } else { "not found" },
        input.display()
    );

    if is_collection {
        println!("{}", "Running collection mode".cyan().bold());
        cmd_collection(
            &collection_input,
            Some(input),
            Some(&output.join(COLLECTION_OUTPUT)),
            JsonFormat::Pretty,
            AnalyzeOptions::default(),
        )
    } else {
        println!("{}", "Running outline mode".cyan().bold());
        let written = outline_directory(input, output, JsonFormat::Pretty, ErrorMode::Lenient)?;
        println!("\n{} {} outlines written", "Done!".green().bold(), written);
        Ok(())
    }
}

fn cmd_version() {
    println!("{} {}", "docsift".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document outlines and persona-driven digests");
    println!();
    println!("License: MIT");
}
