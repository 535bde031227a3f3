//! Outline construction.
//!
//! [`OutlineBuilder`] turns an opened [`DocumentSource`] into a
//! [`DocumentOutline`]. [`OutlineExtractor`] adds the opening step and
//! guarantees a result for every path: when the document cannot be read the
//! outline degrades to a file-name title and no headings.

use std::collections::HashSet;
use std::path::Path;

use crate::classify::HeadingClassifier;
use crate::error::{Error, Result};
use crate::model::{DocumentOutline, HeadingRecord};
use crate::options::{ErrorMode, ExtractOptions};
use crate::source::{DocumentSource, LopdfOpener, SourceOpener};
use crate::title::{filename_title, TitleResolver};

/// Outline of one opened document, with the error that emptied it, if any.
#[derive(Debug)]
pub struct Extraction {
    pub outline: DocumentOutline,
    /// Page error that aborted the scan under [`ErrorMode::Strict`]
    pub scan_error: Option<Error>,
}

impl Extraction {
    /// True when the outline was dropped because a page could not be read.
    pub fn is_degraded(&self) -> bool {
        self.scan_error.is_some()
    }
}

/// Scans pages of one document for headings.
#[derive(Debug, Clone, Default)]
pub struct OutlineBuilder {
    classifier: HeadingClassifier,
    titles: TitleResolver,
    error_mode: ErrorMode,
}

impl OutlineBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from extraction options.
    pub fn with_options(options: &ExtractOptions) -> Self {
        Self {
            classifier: HeadingClassifier::with_thresholds(options.thresholds),
            titles: TitleResolver::new().with_scan_lines(options.title_scan_lines),
            error_mode: options.error_mode,
        }
    }

    /// Classifier used for heading decisions.
    pub fn classifier(&self) -> &HeadingClassifier {
        &self.classifier
    }

    /// Title and outline of a document.
    ///
    /// A failure while scanning pages leaves the title in place and empties
    /// the outline.
    pub fn build<S: DocumentSource>(&self, source: &S, path: &Path) -> DocumentOutline {
        self.build_checked(source, path).outline
    }

    /// Like [`build`](Self::build), keeping the scan error that emptied the
    /// outline.
    pub fn build_checked<S: DocumentSource>(&self, source: &S, path: &Path) -> Extraction {
        let mut outline = DocumentOutline::new(self.titles.resolve(source, path));
        let scan_error = match self.scan(source) {
            Ok(headings) => {
                outline.outline = headings;
                None
            }
            Err(e) => {
                log::error!("Error parsing PDF {}: {}", path.display(), e);
                Some(e)
            }
        };
        Extraction {
            outline,
            scan_error,
        }
    }

    /// Headings of a document in page/line order.
    ///
    /// Pages without text are skipped. Each `(text, page)` pair appears at
    /// most once.
    pub fn scan<S: DocumentSource>(&self, source: &S) -> Result<Vec<HeadingRecord>> {
        let mut headings = Vec::new();
        let mut seen: HashSet<(String, usize)> = HashSet::new();

        for page in 0..source.page_count() {
            let lines = match source.page_lines(page) {
                Ok(Some(lines)) => lines,
                Ok(None) => continue,
                Err(e) => {
                    if self.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Skipping page {}: {}", page, e);
                    continue;
                }
            };

            for line in &lines {
                let Some((level, text)) = self.classifier.classify(line) else {
                    continue;
                };
                if seen.insert((text.clone(), page)) {
                    headings.push(HeadingRecord::new(level, text, page));
                }
            }
        }

        Ok(headings)
    }
}

/// Opens documents and builds their outlines.
#[derive(Debug, Clone)]
pub struct OutlineExtractor<O = LopdfOpener> {
    opener: O,
    builder: OutlineBuilder,
}

impl OutlineExtractor<LopdfOpener> {
    /// Extractor backed by `lopdf` with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Extractor backed by `lopdf` with custom options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self::with_opener(LopdfOpener, options)
    }
}

impl Default for OutlineExtractor<LopdfOpener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: SourceOpener> OutlineExtractor<O> {
    /// Extractor with a custom document opener.
    pub fn with_opener(opener: O, options: ExtractOptions) -> Self {
        Self {
            opener,
            builder: OutlineBuilder::with_options(&options),
        }
    }

    /// The underlying builder.
    pub fn builder(&self) -> &OutlineBuilder {
        &self.builder
    }

    /// Extract the outline of a document. Never fails.
    ///
    /// The document handle is dropped before this returns.
    pub fn extract(&self, path: &Path) -> DocumentOutline {
        match self.opener.open(path) {
            Ok(source) => self.builder.build(&source, path),
            Err(e) => {
                log::error!("Error opening PDF {}: {}", path.display(), e);
                placeholder(path)
            }
        }
    }

    /// Extract the outline, surfacing a failure to open the document.
    ///
    /// A page failure after opening does not make this an error; it shows
    /// up as [`Extraction::scan_error`].
    pub fn try_extract(&self, path: &Path) -> Result<Extraction> {
        let source = self.opener.open(path)?;
        Ok(self.builder.build_checked(&source, path))
    }
}

/// Outline used when a document cannot be read at all.
pub fn placeholder(path: &Path) -> DocumentOutline {
    DocumentOutline::new(filename_title(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Line};

    struct Pages(Vec<Option<&'static str>>);

    impl DocumentSource for Pages {
        fn metadata_title(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn page_count(&self) -> usize {
            self.0.len()
        }

        fn page_text(&self, index: usize) -> Result<Option<String>> {
            match self.0.get(index) {
                Some(Some("<broken>")) => Err(Error::TextExtract("bad font".to_string())),
                Some(text) => Ok(text.map(String::from)),
                None => Err(Error::PageOutOfRange(index, self.0.len())),
            }
        }
    }

    struct SizedLines;

    impl DocumentSource for SizedLines {
        fn metadata_title(&self) -> Result<Option<String>> {
            Ok(Some("Sized Lines Document".to_string()))
        }

        fn page_count(&self) -> usize {
            1
        }

        fn page_text(&self, _index: usize) -> Result<Option<String>> {
            Ok(Some("overview\ndetails".to_string()))
        }

        fn page_lines(&self, _index: usize) -> Result<Option<Vec<Line>>> {
            Ok(Some(vec![
                Line::new("OVERVIEW", 0).with_font_size(18.0),
                Line::new("DETAILS", 1).with_font_size(14.0),
            ]))
        }
    }

    fn texts(headings: &[HeadingRecord]) -> Vec<&str> {
        headings.iter().map(|h| h.text.as_str()).collect()
    }

    #[test]
    fn test_scan_keeps_numbered_line_text() {
        let source = Pages(vec![Some("1. Introduction\nthis line is body text.")]);
        let headings = OutlineBuilder::new().scan(&source).unwrap();
        assert_eq!(
            headings,
            vec![HeadingRecord::new(HeadingLevel::H1, "1. Introduction", 0)]
        );
    }

    #[test]
    fn test_scan_dedups_within_page() {
        let source = Pages(vec![Some("RESULTS\nsome prose here\nRESULTS  \n")]);
        let headings = OutlineBuilder::new().scan(&source).unwrap();
        assert_eq!(texts(&headings), vec!["RESULTS"]);
    }

    #[test]
    fn test_scan_keeps_repeats_across_pages() {
        let source = Pages(vec![Some("RESULTS"), Some("RESULTS")]);
        let headings = OutlineBuilder::new().scan(&source).unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].page, 0);
        assert_eq!(headings[1].page, 1);
    }

    #[test]
    fn test_scan_skips_empty_pages() {
        let source = Pages(vec![None, Some("   "), Some("2.1 Data Sources")]);
        let headings = OutlineBuilder::new().scan(&source).unwrap();
        assert_eq!(
            headings,
            vec![HeadingRecord::new(HeadingLevel::H2, "2.1 Data Sources", 2)]
        );
    }

    #[test]
    fn test_scan_cleans_footer_numbers() {
        let source = Pages(vec![Some("Related Work     7")]);
        let headings = OutlineBuilder::new().scan(&source).unwrap();
        assert_eq!(texts(&headings), vec!["Related Work"]);
    }

    #[test]
    fn test_strict_page_error_empties_outline() {
        let source = Pages(vec![Some("OVERVIEW"), Some("<broken>"), Some("SUMMARY")]);
        let builder = OutlineBuilder::new();
        assert!(builder.scan(&source).is_err());

        let outline = builder.build(&source, Path::new("field-notes.pdf"));
        assert_eq!(outline.title, "Field Notes");
        assert!(outline.is_empty());
    }

    #[test]
    fn test_build_checked_reports_scan_error() {
        let source = Pages(vec![Some("OVERVIEW"), Some("<broken>")]);
        let extraction =
            OutlineBuilder::new().build_checked(&source, Path::new("field-notes.pdf"));
        assert!(extraction.is_degraded());
        assert!(matches!(extraction.scan_error, Some(Error::TextExtract(_))));
        assert!(extraction.outline.is_empty());

        let lenient = OutlineBuilder::with_options(&ExtractOptions::new().lenient());
        let extraction = lenient.build_checked(&source, Path::new("field-notes.pdf"));
        assert!(!extraction.is_degraded());
        assert_eq!(texts(&extraction.outline.outline), vec!["OVERVIEW"]);
    }

    #[test]
    fn test_lenient_page_error_skips_page() {
        let source = Pages(vec![Some("OVERVIEW"), Some("<broken>"), Some("SUMMARY")]);
        let builder = OutlineBuilder::with_options(&ExtractOptions::new().lenient());
        let headings = builder.scan(&source).unwrap();
        assert_eq!(texts(&headings), vec!["OVERVIEW", "SUMMARY"]);
        assert_eq!(headings[1].page, 2);
    }

    #[test]
    fn test_font_sizes_from_backend() {
        let outline = OutlineBuilder::new().build(&SizedLines, Path::new("sized.pdf"));
        assert_eq!(outline.title, "Sized Lines Document");
        assert_eq!(outline.outline[0].level, HeadingLevel::H1);
        assert_eq!(outline.outline[1].level, HeadingLevel::H2);
    }

    #[test]
    fn test_placeholder() {
        let outline = placeholder(Path::new("/in/site_survey-2023.pdf"));
        assert_eq!(outline.title, "Site Survey 2023");
        assert!(outline.outline.is_empty());
    }
}
