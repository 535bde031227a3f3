//! Outline types emitted per document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse three-tier heading hierarchy, `H1` most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Label used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    /// Hierarchy level
    pub level: HeadingLevel,

    /// Cleaned heading text (never empty)
    pub text: String,

    /// 0-based page index
    pub page: usize,
}

impl HeadingRecord {
    /// Create a new heading record.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title plus ordered headings for one document.
///
/// Headings are kept in page/line scan order. No two records share the
/// same `(text, page)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Resolved document title
    pub title: String,

    /// Headings in discovery order
    pub outline: Vec<HeadingRecord>,
}

impl DocumentOutline {
    /// Create an outline with a title and no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Headings at the given level.
    pub fn headings_at(&self, level: HeadingLevel) -> impl Iterator<Item = &HeadingRecord> {
        self.outline.iter().filter(move |h| h.level == level)
    }

    /// Headings found on the given page.
    pub fn headings_on_page(&self, page: usize) -> impl Iterator<Item = &HeadingRecord> {
        self.outline.iter().filter(move |h| h.page == page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_as_label() {
        let record = HeadingRecord::new(HeadingLevel::H2, "1.1 Scope", 3);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"1.1 Scope","page":3}"#);
    }

    #[test]
    fn test_outline_shape() {
        let mut doc = DocumentOutline::new("Report");
        doc.outline.push(HeadingRecord::new(HeadingLevel::H1, "1. Intro", 0));
        let value: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["title"], "Report");
        assert_eq!(value["outline"][0]["level"], "H1");
        assert_eq!(value["outline"][0]["page"], 0);
    }

    #[test]
    fn test_outline_filters() {
        let mut doc = DocumentOutline::new("Report");
        doc.outline.push(HeadingRecord::new(HeadingLevel::H1, "One", 0));
        doc.outline.push(HeadingRecord::new(HeadingLevel::H2, "Two", 1));
        doc.outline.push(HeadingRecord::new(HeadingLevel::H2, "Three", 1));

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.headings_at(HeadingLevel::H2).count(), 2);
        assert_eq!(doc.headings_on_page(0).count(), 1);
        assert_eq!(HeadingLevel::H3.depth(), 3);
        assert_eq!(HeadingLevel::H1.to_string(), "H1");
    }
}
