//! Extraction options and configuration.

use crate::classify::FontThresholds;

/// Number of leading first-page lines inspected for a title.
pub const DEFAULT_TITLE_SCAN_LINES: usize = 10;

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Font-size cutoffs for H1/H2/H3
    pub thresholds: FontThresholds,

    /// How page-level extraction errors are handled
    pub error_mode: ErrorMode,

    /// Leading first-page lines considered by the title heuristic
    pub title_scan_lines: usize,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font thresholds.
    pub fn with_thresholds(mut self, thresholds: FontThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose text cannot be read).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set how many first-page lines the title heuristic inspects.
    pub fn with_title_scan_lines(mut self, lines: usize) -> Self {
        self.title_scan_lines = lines;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            thresholds: FontThresholds::default(),
            error_mode: ErrorMode::Strict,
            title_scan_lines: DEFAULT_TITLE_SCAN_LINES,
        }
    }
}

/// Error handling mode while scanning pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A page read error abandons the document's outline
    #[default]
    Strict,
    /// Log the failing page and continue with the next one
    Lenient,
}
