//! Output and intermediate types.
//!
//! `DocumentOutline` is what a single extraction produces; `Line` is the
//! transient unit passed from a page's text to the heading classifier.

mod line;
mod outline;

pub use line::Line;
pub use outline::{DocumentOutline, HeadingLevel, HeadingRecord};
