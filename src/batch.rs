//! Directory batch processing.
//!
//! Every `.pdf` file in the input directory gets its own `<stem>.json` in the
//! output directory, even when the document cannot be read. A failing file is
//! logged and counted; it never stops the batch.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::builder::{placeholder, OutlineExtractor};
use crate::error::Result;
use crate::render::{write_json, JsonFormat};
use crate::source::{LopdfOpener, SourceOpener};

/// Options for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Process files concurrently
    pub parallel: bool,
    /// JSON layout of output files
    pub format: JsonFormat,
}

impl BatchOptions {
    /// Create batch options with defaults (sequential, pretty JSON).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

/// What happened to a single input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Document opened and its outline written
    Extracted,
    /// Document could not be opened, or a page failed under strict mode;
    /// fallback title and empty outline written
    Degraded,
    /// Output could not be written
    Failed,
}

/// Result for a single input file.
#[derive(Debug, Clone)]
pub struct FileResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: FileStatus,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Per-file results in input order
    pub files: Vec<FileResult>,
}

impl BatchReport {
    /// Number of input files seen.
    pub fn processed(&self) -> usize {
        self.files.len()
    }

    /// Number of files with the given status.
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

/// List `.pdf` files (any extension case) in a directory, sorted by path.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Output path for an input file: `<output_dir>/<stem>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Output paths for a set of inputs, one distinct file per input.
///
/// Each input maps to `<stem>.json`. When stems collide (`a.pdf` next to
/// `a.PDF`), inputs with a lowercase `.pdf` extension keep `<stem>.json` and
/// the rest get `<file name>.json`.
pub fn output_paths(inputs: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let (lowercase, other): (Vec<usize>, Vec<usize>) = (0..inputs.len())
        .partition(|&i| inputs[i].extension().map_or(false, |ext| ext == "pdf"));

    let mut claimed = HashSet::new();
    let mut outputs = vec![PathBuf::new(); inputs.len()];
    for i in lowercase.into_iter().chain(other) {
        let input = &inputs[i];
        let mut candidate = output_path(input, output_dir);
        if !claimed.insert(candidate.clone()) {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            candidate = output_dir.join(format!("{}.json", name));
            let mut n = 2;
            while !claimed.insert(candidate.clone()) {
                candidate = output_dir.join(format!("{}-{}.json", name, n));
                n += 1;
            }
            log::warn!(
                "Output name collision for {}, writing {}",
                input.display(),
                candidate.display()
            );
        }
        outputs[i] = candidate;
    }
    outputs
}

/// Runs outline extraction over a directory.
#[derive(Debug, Clone)]
pub struct BatchProcessor<O = LopdfOpener> {
    extractor: OutlineExtractor<O>,
    options: BatchOptions,
}

impl BatchProcessor<LopdfOpener> {
    /// Processor backed by `lopdf` with default extraction options.
    pub fn new(options: BatchOptions) -> Self {
        Self::with_extractor(OutlineExtractor::new(), options)
    }
}

impl<O: SourceOpener + Sync> BatchProcessor<O> {
    /// Processor with a custom extractor.
    pub fn with_extractor(extractor: OutlineExtractor<O>, options: BatchOptions) -> Self {
        Self { extractor, options }
    }

    /// Process every PDF in `input_dir`, writing results to `output_dir`.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchReport> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `progress` after each file.
    pub fn run_with_progress<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        progress: F,
    ) -> Result<BatchReport>
    where
        F: Fn(&FileResult) + Sync,
    {
        let inputs = discover_pdfs(input_dir)?;
        self.run_files(&inputs, output_dir, progress)
    }

    /// Process an explicit list of files.
    pub fn run_files<F>(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        progress: F,
    ) -> Result<BatchReport>
    where
        F: Fn(&FileResult) + Sync,
    {
        fs::create_dir_all(output_dir)?;
        log::info!(
            "Processing {} PDF file(s) into {}",
            inputs.len(),
            output_dir.display()
        );

        let outputs = output_paths(inputs, output_dir);
        let process = |(input, output): (&PathBuf, &PathBuf)| {
            let result = self.process_file(input, output);
            progress(&result);
            result
        };

        let files: Vec<FileResult> = if self.options.parallel {
            inputs.par_iter().zip(outputs.par_iter()).map(process).collect()
        } else {
            inputs.iter().zip(outputs.iter()).map(process).collect()
        };

        let report = BatchReport { files };
        log::info!(
            "Batch complete: {} extracted, {} degraded, {} failed",
            report.count(FileStatus::Extracted),
            report.count(FileStatus::Degraded),
            report.count(FileStatus::Failed)
        );
        Ok(report)
    }

    /// Extract `input` and write its outline to `output`. Never fails.
    pub fn process_file(&self, input: &Path, output: &Path) -> FileResult {
        let output = output.to_path_buf();
        let name = input.file_name().unwrap_or_default().to_string_lossy();

        let (outline, mut status) = match self.extractor.try_extract(input) {
            Ok(extraction) if extraction.is_degraded() => {
                (extraction.outline, FileStatus::Degraded)
            }
            Ok(extraction) => (extraction.outline, FileStatus::Extracted),
            Err(e) => {
                log::error!("Failed on {}: {}", name, e);
                (placeholder(input), FileStatus::Degraded)
            }
        };

        if let Err(e) = write_json(&outline, &output, self.options.format) {
            log::error!("Failed to write {}: {}", output.display(), e);
            status = FileStatus::Failed;
            if let Err(e) = write_json(&placeholder(input), &output, self.options.format) {
                log::error!("Failed to write placeholder for {}: {}", name, e);
            }
        } else {
            log::debug!("Wrote {} ({} headings)", output.display(), outline.len());
        }

        FileResult {
            input: input.to_path_buf(),
            output,
            status,
        }
    }
}
