//! Ordered table of structural heading shapes.
//!
//! Rules are tried in order and the first match decides. All rules are
//! case-insensitive and anchored at the start of the line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::HeadingLevel;

/// What a structural match means for the heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOutcome {
    /// Numbering depth fixes the level.
    Level(HeadingLevel),
    /// Recognized shape without a level of its own. A line that also names a
    /// chapter or appendix becomes `H1`, anything else falls through to font
    /// size and case rules.
    Structural,
}

/// A single shape rule.
#[derive(Debug)]
pub struct HeadingPattern {
    /// Short identifier for logging and tests
    pub name: &'static str,
    regex: Regex,
    /// Level assignment for a match
    pub outcome: PatternOutcome,
}

impl HeadingPattern {
    fn new(name: &'static str, pattern: &str, outcome: PatternOutcome) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            outcome,
        }
    }

    /// Check whether the line has this shape.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// The process-wide rule table.
pub static HEADING_PATTERNS: Lazy<Vec<HeadingPattern>> = Lazy::new(|| {
    use PatternOutcome::{Level, Structural};

    vec![
        HeadingPattern::new("decimal", r"(?i)^\d+\.(?:\s+.+)?$", Level(HeadingLevel::H1)),
        HeadingPattern::new(
            "decimal-2",
            r"(?i)^\d+\.\d+\.?(?:\s+.+)?$",
            Level(HeadingLevel::H2),
        ),
        HeadingPattern::new(
            "decimal-3",
            r"(?i)^\d+\.\d+\.\d+\.?(?:\s+.+)?$",
            Level(HeadingLevel::H3),
        ),
        HeadingPattern::new("chapter", r"(?i)^chapter\s+\d+[:.\s]*.*$", Structural),
        HeadingPattern::new("section", r"(?i)^section\s+\d+[:.\s]*.*$", Structural),
        HeadingPattern::new("appendix", r"(?i)^appendix\s+[A-Z][:.\s]*.*$", Structural),
        HeadingPattern::new("roman", r"(?i)^[IVX]+\.\s+.+$", Structural),
        HeadingPattern::new("letter", r"(?i)^[A-Z]\.\s+.+$", Structural),
    ]
});

/// First rule whose shape matches the line.
pub fn first_match(text: &str) -> Option<&'static HeadingPattern> {
    HEADING_PATTERNS.iter().find(|p| p.matches(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(text: &str) -> Option<&'static str> {
        first_match(text).map(|p| p.name)
    }

    #[test]
    fn test_decimal_depths() {
        assert_eq!(name_of("3."), Some("decimal"));
        assert_eq!(name_of("1. Introduction"), Some("decimal"));
        assert_eq!(name_of("3.2"), Some("decimal-2"));
        assert_eq!(name_of("2.4 Results"), Some("decimal-2"));
        assert_eq!(name_of("3.2.1"), Some("decimal-3"));
        assert_eq!(name_of("3.2.1 Sampling"), Some("decimal-3"));
    }

    #[test]
    fn test_named_shapes_any_case() {
        assert_eq!(name_of("Chapter 4: Design"), Some("chapter"));
        assert_eq!(name_of("CHAPTER 4"), Some("chapter"));
        assert_eq!(name_of("section 2 Scope"), Some("section"));
        assert_eq!(name_of("Appendix B"), Some("appendix"));
        assert_eq!(name_of("appendix c: Glossary"), Some("appendix"));
    }

    #[test]
    fn test_enumerators() {
        assert_eq!(name_of("IV. Findings"), Some("roman"));
        assert_eq!(name_of("B. Background"), Some("letter"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(name_of("Introduction"), None);
        assert_eq!(name_of("12 Monkeys"), None);
        assert_eq!(name_of("Chapterhouse"), None);
    }

    #[test]
    fn test_table_order() {
        let names: Vec<_> = HEADING_PATTERNS.iter().map(|p| p.name).collect();
        assert_eq!(names[0], "decimal");
        assert_eq!(names.last(), Some(&"letter"));
    }
}
