//! pdf-outline CLI - heading outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::{
    BatchOptions, BatchProcessor, DocumentSource, ExtractOptions, FileStatus, HeadingLevel,
    JsonFormat, LopdfSource, OutlineBuilder, OutlineExtractor,
};

const DEFAULT_INPUT_DIR: &str = "/app/input";
const DEFAULT_OUTPUT_DIR: &str = "/app/output";

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract titles and heading outlines from PDF files as JSON", long_about = None)]
struct Cli {
    /// Directory of input PDF files
    #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// Directory for JSON output
    #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    #[command(flatten)]
    flags: BatchFlags,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Copy)]
struct BatchFlags {
    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip unreadable pages instead of dropping the whole outline
    #[arg(long)]
    lenient: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory of input PDF files
        #[arg(value_name = "INPUT_DIR", env = "PDF_OUTLINE_INPUT", default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory for JSON output
        #[arg(value_name = "OUTPUT_DIR", env = "PDF_OUTLINE_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        #[command(flatten)]
        flags: BatchFlags,
    },

    /// Extract the outline of a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip unreadable pages instead of dropping the whole outline
        #[arg(long)]
        lenient: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

impl BatchFlags {
    fn extract_options(&self) -> ExtractOptions {
        if self.lenient {
            ExtractOptions::new().lenient()
        } else {
            ExtractOptions::new()
        }
    }

    fn batch_options(&self) -> BatchOptions {
        BatchOptions::new()
            .with_parallel(self.parallel)
            .with_format(json_format(self.compact))
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            flags,
        }) => cmd_batch(&input, &output, flags),
        Some(Commands::Outline {
            input,
            output,
            lenient,
            compact,
        }) => cmd_outline(&input, output.as_deref(), lenient, compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_batch(&cli.input, &cli.output, cli.flags),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    flags: BatchFlags,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;
    let inputs = pdf_outline::batch::discover_pdfs(input)?;
    log::debug!("Found {} PDF file(s) in {}", inputs.len(), input.display());
    if inputs.is_empty() {
        println!("{} {}", "No PDF files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let processor = BatchProcessor::with_extractor(
        OutlineExtractor::with_options(flags.extract_options()),
        flags.batch_options(),
    );
    let report = processor.run_files(&inputs, output, |result| {
        let name = result.input.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!();
    for file in &report.files {
        let name = file.input.file_name().unwrap_or_default().to_string_lossy();
        match file.status {
            FileStatus::Extracted => println!("  {} {}", "✓".green(), name),
            FileStatus::Degraded => {
                println!("  {} {} (unreadable, empty outline written)", "!".yellow(), name)
            }
            FileStatus::Failed => println!("  {} {} (output not written)", "✗".red(), name),
        }
    }

    println!(
        "\n{} {} extracted, {} degraded, {} failed → {}",
        "Done!".green().bold(),
        report.count(FileStatus::Extracted),
        report.count(FileStatus::Degraded),
        report.count(FileStatus::Failed),
        output.display()
    );

    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    lenient: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = if lenient {
        ExtractOptions::new().lenient()
    } else {
        ExtractOptions::new()
    };
    let outline = OutlineExtractor::with_options(options).extract(input);
    log::debug!("{}: {} headings", input.display(), outline.len());
    let json = pdf_outline::render::to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = LopdfSource::load_file(input)?;
    let outline = OutlineBuilder::new().build(&source, input);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if source.is_encrypted() { "Yes" } else { "No" }
    );
    if let Ok(Some(title)) = source.metadata_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    println!("{}: {}", "Resolved title".bold(), outline.title);

    println!();
    println!("{}", "Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        println!("{}: {}", level.as_str().bold(), outline.headings_at(level).count());
    }
    for heading in &outline.outline {
        let indent = "  ".repeat(heading.level.depth() as usize - 1);
        println!(
            "{}{} {}",
            indent,
            heading.text,
            format!("(p. {})", heading.page).dimmed()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF heading outline extraction tool");
    println!();
    println!("License: MIT");
}
