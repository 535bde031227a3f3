//! # pdf-outline
//!
//! Heuristic outline extraction for PDF documents.
//!
//! For each document this library resolves a title and a list of headings
//! (H1/H2/H3 with 0-based page numbers) from the document's text layer, using
//! numbering shapes, letter case and, when available, font size.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_outline, render::JsonFormat};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let outline = extract_outline("document.pdf");
//!     println!("{}", pdf_outline::render::to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior
//!
//! - **Best effort**: an unreadable document yields a file-name title and an
//!   empty outline instead of an error
//! - **Stateless**: documents share nothing, so batches parallelize freely
//! - **Pluggable PDF access**: the heuristics only see a [`DocumentSource`];
//!   the default is backed by `lopdf`

pub mod batch;
pub mod builder;
pub mod classify;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod source;
pub mod text;
pub mod title;

// Re-export commonly used types
pub use batch::{BatchOptions, BatchProcessor, BatchReport, FileResult, FileStatus};
pub use builder::{Extraction, OutlineBuilder, OutlineExtractor};
pub use classify::{FontThresholds, HeadingClassifier};
pub use error::{Error, Result};
pub use model::{DocumentOutline, HeadingLevel, HeadingRecord, Line};
pub use options::{ErrorMode, ExtractOptions};
pub use render::JsonFormat;
pub use source::{DocumentSource, LopdfOpener, LopdfSource, SourceOpener};
pub use title::TitleResolver;

use std::path::Path;

/// Extract the title and outline of a PDF file.
///
/// Never fails: a document that cannot be read produces a title derived from
/// its file name and an empty outline.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::extract_outline;
///
/// let outline = extract_outline("report.pdf");
/// for heading in &outline.outline {
///     println!("{} {} (page {})", heading.level, heading.text, heading.page);
/// }
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> DocumentOutline {
    OutlineExtractor::new().extract(path.as_ref())
}

/// Extract with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{extract_outline_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().lenient();
/// let outline = extract_outline_with_options("report.pdf", options);
/// ```
pub fn extract_outline_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> DocumentOutline {
    OutlineExtractor::with_options(options).extract(path.as_ref())
}

/// Extract the outline of a PDF held in memory.
///
/// Unlike [`extract_outline`], a buffer that cannot be parsed is an error,
/// since there is no file name to fall back on. `name` stands in for the
/// file name in the title fallback.
pub fn extract_outline_from_bytes(data: &[u8], name: &str) -> Result<DocumentOutline> {
    let source = LopdfSource::load_bytes(data)?;
    Ok(OutlineBuilder::new().build(&source, Path::new(name)))
}

/// Process every PDF in `input_dir`, writing one JSON file per input into
/// `output_dir`.
///
/// # Example
///
/// ```no_run
/// use pdf_outline::{process_directory, BatchOptions};
///
/// let report = process_directory("/app/input", "/app/output", BatchOptions::new()).unwrap();
/// println!("{} files processed", report.processed());
/// ```
pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    options: BatchOptions,
) -> Result<BatchReport> {
    BatchProcessor::new(options).run(input_dir.as_ref(), output_dir.as_ref())
}
