//! PDF access seam.
//!
//! The outline heuristics never touch a PDF library directly. They see a
//! [`DocumentSource`] (metadata title plus page-ordered text) obtained from a
//! [`SourceOpener`]. [`LopdfOpener`] is the default, backed by `lopdf`; tests
//! and richer backends plug in their own implementations.

mod lopdf_source;

pub use lopdf_source::{decode_text_string, has_pdf_header, LopdfOpener, LopdfSource};

use std::path::Path;

use crate::error::Result;
use crate::model::Line;

/// An opened document.
///
/// The handle is released when the value is dropped.
pub trait DocumentSource {
    /// Title from the document information dictionary, if present.
    fn metadata_title(&self) -> Result<Option<String>>;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Text of a page (0-based). `None` when the page has no text layer.
    fn page_text(&self, index: usize) -> Result<Option<String>>;

    /// Lines of a page (0-based), split on raw line breaks.
    ///
    /// The default carries no font sizes. Backends that know the font size of
    /// each line override this.
    fn page_lines(&self, index: usize) -> Result<Option<Vec<Line>>> {
        Ok(self
            .page_text(index)?
            .filter(|text| !text.trim().is_empty())
            .map(|text| Line::split_page(&text)))
    }
}

/// Opens documents by path.
pub trait SourceOpener {
    /// Source type produced by this opener.
    type Source: DocumentSource;

    /// Open a document.
    fn open(&self, path: &Path) -> Result<Self::Source>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnePage(Option<&'static str>);

    impl DocumentSource for OnePage {
        fn metadata_title(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn page_count(&self) -> usize {
            1
        }

        fn page_text(&self, _index: usize) -> Result<Option<String>> {
            Ok(self.0.map(String::from))
        }
    }

    #[test]
    fn test_default_page_lines() {
        let lines = OnePage(Some("A\nB")).page_lines(0).unwrap().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "B");
        assert_eq!(lines[1].position, 1);
    }

    #[test]
    fn test_blank_page_has_no_lines() {
        assert!(OnePage(Some("  \n ")).page_lines(0).unwrap().is_none());
        assert!(OnePage(None).page_lines(0).unwrap().is_none());
    }
}
