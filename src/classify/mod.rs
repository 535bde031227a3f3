//! Heading detection and level assignment.
//!
//! [`HeadingClassifier::is_heading`] decides whether a cleaned line looks
//! like a heading at all; [`HeadingClassifier::level`] places an accepted
//! line in the H1/H2/H3 hierarchy. Neither can fail.

mod patterns;

pub use patterns::{first_match, HeadingPattern, PatternOutcome, HEADING_PATTERNS};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{HeadingLevel, Line};
use crate::text::{char_len, clean, is_title_case, is_uppercase};

/// Enumerator prefix such as "1. ", "A) " or "iv. ".
static ENUMERATOR_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+[.)]\s+").unwrap());

const TERMINAL_PUNCTUATION: [char; 5] = ['.', ',', ';', '!', '?'];
const MIN_HEADING_LEN: usize = 3;
const MAX_HEADING_LEN: usize = 150;
const MAX_UPPERCASE_LEN: usize = 60;
const MIN_TITLE_CASE_LEN: usize = 5;
const MAX_TITLE_CASE_LEN: usize = 60;

/// Font-size cutoffs in points, checked from H1 down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontThresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl FontThresholds {
    /// Level implied by a font size, if it reaches any threshold.
    pub fn level_for(&self, font_size: f32) -> Option<HeadingLevel> {
        if font_size >= self.h1 {
            Some(HeadingLevel::H1)
        } else if font_size >= self.h2 {
            Some(HeadingLevel::H2)
        } else if font_size >= self.h3 {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}

impl Default for FontThresholds {
    fn default() -> Self {
        Self {
            h1: 16.0,
            h2: 14.0,
            h3: 12.0,
        }
    }
}

/// Rule-based heading classifier.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    thresholds: FontThresholds,
}

impl HeadingClassifier {
    /// Create a classifier with the default font thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom font thresholds.
    pub fn with_thresholds(thresholds: FontThresholds) -> Self {
        Self { thresholds }
    }

    /// Font thresholds in use.
    pub fn thresholds(&self) -> &FontThresholds {
        &self.thresholds
    }

    /// Check whether a cleaned line is a heading candidate.
    pub fn is_heading(&self, text: &str) -> bool {
        let len = char_len(text);
        if !(MIN_HEADING_LEN..=MAX_HEADING_LEN).contains(&len) {
            return false;
        }
        if text.ends_with(&TERMINAL_PUNCTUATION[..]) {
            return false;
        }

        if is_uppercase(text) && len < MAX_UPPERCASE_LEN {
            return true;
        }
        if ENUMERATOR_PREFIX.is_match(text) {
            return true;
        }
        is_title_case(text) && (MIN_TITLE_CASE_LEN..=MAX_TITLE_CASE_LEN).contains(&len)
    }

    /// Assign a hierarchy level to a heading.
    ///
    /// Structural numbering wins, then font size, then case: title-case text
    /// is `H2` and anything else `H3`.
    pub fn level(&self, text: &str, _position: usize, font_size: Option<f32>) -> HeadingLevel {
        let text = text.trim();

        if let Some(pattern) = first_match(text) {
            match pattern.outcome {
                PatternOutcome::Level(level) => return level,
                PatternOutcome::Structural if names_chapter_or_appendix(text) => {
                    return HeadingLevel::H1;
                }
                PatternOutcome::Structural => {}
            }
        }

        if let Some(level) = font_size.and_then(|size| self.thresholds.level_for(size)) {
            return level;
        }

        if is_title_case(text) {
            HeadingLevel::H2
        } else {
            HeadingLevel::H3
        }
    }

    /// Clean a raw line and classify it in one step.
    ///
    /// Returns the cleaned text with its level, or `None` when the line is
    /// empty after cleaning or not a heading.
    pub fn classify(&self, line: &Line) -> Option<(HeadingLevel, String)> {
        let text = clean(&line.text);
        if text.is_empty() || !self.is_heading(&text) {
            return None;
        }
        let level = self.level(&text, line.position, line.font_size);
        Some((level, text))
    }
}

fn names_chapter_or_appendix(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("chapter") || lower.contains("appendix")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_length_bounds() {
        let c = HeadingClassifier::new();
        assert!(!c.is_heading("AB"));
        assert!(!c.is_heading(""));
        assert!(!c.is_heading(&"A".repeat(151)));
        assert!(c.is_heading("ABC"));
    }

    #[test]
    fn test_rejects_terminal_punctuation() {
        let c = HeadingClassifier::new();
        for text in [
            "INTRODUCTION.",
            "Overview,",
            "1. Scope;",
            "Results Are In!",
            "WHAT NEXT?",
        ] {
            assert!(!c.is_heading(text), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_accepts_uppercase() {
        let c = HeadingClassifier::new();
        assert!(c.is_heading("EXECUTIVE SUMMARY"));
        assert!(!c.is_heading(&"LONG ".repeat(14)));
    }

    #[test]
    fn test_accepts_enumerator_prefix() {
        let c = HeadingClassifier::new();
        assert!(c.is_heading("1. introduction to the method"));
        assert!(c.is_heading("A) scope of work"));
    }

    #[test]
    fn test_accepts_title_case() {
        let c = HeadingClassifier::new();
        assert!(c.is_heading("Related Work"));
        assert!(!c.is_heading("Work"));
        assert!(!c.is_heading("this is ordinary body text"));
        assert!(!c.is_heading("Annual Report on Operations"));
    }

    #[test]
    fn test_numeric_levels() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("3.", 0, None), HeadingLevel::H1);
        assert_eq!(c.level("3.2", 0, None), HeadingLevel::H2);
        assert_eq!(c.level("3.2.1", 0, None), HeadingLevel::H3);
        assert_eq!(c.level("1. Introduction", 0, None), HeadingLevel::H1);
        assert_eq!(c.level("2.1 Data Sources", 4, None), HeadingLevel::H2);
    }

    #[test]
    fn test_numeric_levels_ignore_font_size() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("3.2.1", 0, Some(24.0)), HeadingLevel::H3);
        assert_eq!(c.level("7.", 0, Some(9.0)), HeadingLevel::H1);
    }

    #[test]
    fn test_chapter_and_appendix_are_h1() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("Chapter 3: Methods", 0, None), HeadingLevel::H1);
        assert_eq!(c.level("CHAPTER 3", 0, Some(10.0)), HeadingLevel::H1);
        assert_eq!(c.level("appendix b glossary", 0, Some(12.5)), HeadingLevel::H1);
        assert_eq!(c.level("II. Chapter Summary", 0, None), HeadingLevel::H1);
    }

    #[test]
    fn test_numeric_match_beats_chapter_word() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("1.1 Chapter Review", 0, None), HeadingLevel::H2);
    }

    #[test]
    fn test_structural_without_level_falls_through() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("Section 2 Scope", 0, Some(14.5)), HeadingLevel::H2);
        assert_eq!(c.level("B. background notes", 0, None), HeadingLevel::H3);
        // "IV" is not title-case, so the default lands on H3
        assert_eq!(c.level("IV. Findings", 0, None), HeadingLevel::H3);
    }

    #[test]
    fn test_font_thresholds() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("overview", 0, Some(16.0)), HeadingLevel::H1);
        assert_eq!(c.level("overview", 0, Some(14.0)), HeadingLevel::H2);
        assert_eq!(c.level("overview", 0, Some(12.0)), HeadingLevel::H3);
        assert_eq!(c.level("Overview", 0, Some(11.9)), HeadingLevel::H2);
    }

    #[test]
    fn test_default_by_case() {
        let c = HeadingClassifier::new();
        assert_eq!(c.level("Related Work", 0, None), HeadingLevel::H2);
        assert_eq!(c.level("RELATED WORK", 0, None), HeadingLevel::H3);
    }

    #[test]
    fn test_custom_thresholds() {
        let c = HeadingClassifier::with_thresholds(FontThresholds {
            h1: 20.0,
            h2: 18.0,
            h3: 16.0,
        });
        assert_eq!(c.level("overview", 0, Some(16.0)), HeadingLevel::H3);
        assert_eq!(c.thresholds().h1, 20.0);
    }

    #[test]
    fn test_classify_line() {
        let c = HeadingClassifier::new();
        let line = Line::new("  1.   Introduction   ", 2);
        assert_eq!(
            c.classify(&line),
            Some((HeadingLevel::H1, "1. Introduction".to_string()))
        );
        assert_eq!(c.classify(&Line::new("plain prose here", 0)), None);
        assert_eq!(c.classify(&Line::new("   ", 0)), None);
    }
}
