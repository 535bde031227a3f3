//! Rendering of outlines to output formats.

mod json;

pub use json::{to_json, write_json, JsonFormat};
