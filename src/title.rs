//! Document title resolution.
//!
//! Sources are tried in order, first hit wins:
//!
//! 1. the `/Title` metadata entry, if longer than three characters;
//! 2. a line from the first page that looks like a title;
//! 3. the file name, title-cased.
//!
//! Failures in the first two steps are logged and swallowed, so resolution
//! always yields a non-empty string.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::DEFAULT_TITLE_SCAN_LINES;
use crate::source::DocumentSource;
use crate::text::{char_len, clean, clean_title, to_title_case};

/// Lines made only of digits and punctuation (dates, rules, page counters).
static NO_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d\W]+$").unwrap());

/// Running-header and boilerplate markers that never make a title.
///
/// "confidential" catches classification stamps above the real title. It
/// also rejects genuine titles that contain the word, such as
/// "Confidential Settlement Agreement Summary"; those fall through to the
/// next line or the file name.
const BOILERPLATE: [&str; 5] = ["page", "copyright", "www.", "http", "confidential"];

const MIN_METADATA_LEN: usize = 3;
const MIN_LINE_LEN: usize = 3;
const MIN_TITLE_LEN: usize = 10;
const MAX_TITLE_LEN: usize = 100;
const UNTITLED: &str = "Untitled";

/// Picks a title for a document.
#[derive(Debug, Clone)]
pub struct TitleResolver {
    scan_lines: usize,
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self {
            scan_lines: DEFAULT_TITLE_SCAN_LINES,
        }
    }
}

impl TitleResolver {
    /// Create a resolver with the default scan window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many leading first-page lines are preferred.
    pub fn with_scan_lines(mut self, lines: usize) -> Self {
        self.scan_lines = lines;
        self
    }

    /// Resolve a title. Never fails and never returns an empty string.
    pub fn resolve<S: DocumentSource>(&self, source: &S, path: &Path) -> String {
        self.from_metadata(source)
            .or_else(|| self.from_content(source))
            .unwrap_or_else(|| filename_title(path))
    }

    /// Title from document metadata.
    pub fn from_metadata<S: DocumentSource>(&self, source: &S) -> Option<String> {
        match source.metadata_title() {
            Ok(Some(raw)) => {
                let title = clean_title(&raw);
                (char_len(&title) > MIN_METADATA_LEN).then_some(title)
            }
            Ok(None) => None,
            Err(e) => {
                log::debug!("Metadata title extraction failed: {}", e);
                None
            }
        }
    }

    /// Title from the text of the first page.
    pub fn from_content<S: DocumentSource>(&self, source: &S) -> Option<String> {
        if source.page_count() == 0 {
            return None;
        }
        match source.page_text(0) {
            Ok(Some(text)) => self.from_text(&text),
            Ok(None) => None,
            Err(e) => {
                log::error!("Title extraction failed: {}", e);
                None
            }
        }
    }

    /// Pick a title line out of first-page text.
    pub fn from_text(&self, text: &str) -> Option<String> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        for line in lines.iter().take(self.scan_lines) {
            let line = clean(line);
            let len = char_len(&line);
            if len < MIN_LINE_LEN || NO_WORDS.is_match(&line) {
                continue;
            }
            let lower = line.to_lowercase();
            if BOILERPLATE.iter().any(|marker| lower.contains(marker)) {
                continue;
            }
            if (MIN_TITLE_LEN..=MAX_TITLE_LEN).contains(&len) && !line.ends_with(':') {
                return Some(line);
            }
        }

        lines
            .iter()
            .map(|line| clean(line))
            .find(|line| char_len(line) >= MIN_TITLE_LEN)
    }
}

/// Title derived from a file name: stem, `_`/`-` to spaces, title-cased.
pub fn filename_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = to_title_case(&stem.replace(|c: char| c == '_' || c == '-', " "));
    let title = title.trim();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.to_string()
    }
}
