//! Marker detection: compiling keyword rules into a matcher and applying it
//! to lines of text.

mod lines;
mod pattern;

pub use lines::{LineSource, TextLines, scan_lines, scan_text, split_lines};
pub use pattern::{CompiledMatcher, DEFAULT_PATTERN, KEYWORDS_PLACEHOLDER, KeywordRule};
