//! Transient line unit handed to the classifier.

/// A raw line of page text with optional layout hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Raw text as extracted
    pub text: String,
    /// 0-based index within the page's line list
    pub position: usize,
    /// Font size in points, when the backend knows it
    pub font_size: Option<f32>,
}

impl Line {
    /// Create a line without font information.
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
            font_size: None,
        }
    }

    /// Attach a font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Split page text on raw line breaks.
    ///
    /// Empty lines are kept so that positions match the page's line list.
    pub fn split_page(text: &str) -> Vec<Line> {
        text.split('\n')
            .enumerate()
            .map(|(i, s)| Line::new(s, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_page_keeps_positions() {
        let lines = Line::split_page("Title\n\nBody text");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "");
        assert_eq!(lines[2].position, 2);
        assert!(lines[2].font_size.is_none());
    }

    #[test]
    fn test_with_font_size() {
        let line = Line::new("Heading", 0).with_font_size(18.0);
        assert_eq!(line.font_size, Some(18.0));
    }
}
