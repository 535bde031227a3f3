//! JSON rendering for document outlines.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline)?,
        JsonFormat::Compact => serde_json::to_string(outline)?,
    };
    Ok(json)
}

/// Write an outline as JSON to a file, replacing any previous content.
pub fn write_json(outline: &DocumentOutline, path: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(outline, format)?;
    fs::write(path, json)?;
    Ok(())
}
