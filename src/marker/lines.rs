use crate::diagnostic::{Diagnostic, Severity};
use crate::document::{DocumentId, OpenBuffer};

use super::CompiledMatcher;

/// Line-addressable text.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator.
    fn line(&self, index: usize) -> &str;
}

impl LineSource for OpenBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl LineSource for [String] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> &str {
        &self[index]
    }
}

/// Borrowed view over raw decoded text, split on `\n` and `\r\n`.
#[derive(Debug, Clone)]
pub struct TextLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> TextLines<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: split_lines(text).collect(),
        }
    }
}

impl LineSource for TextLines<'_> {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, index: usize) -> &str {
        self.lines[index]
    }
}

/// Split on `\r?\n`. A trailing newline yields a final empty line, as editors show it.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// One match on one line, before it is attached to a document.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineMatch {
    start_column: usize,
    end_column: usize,
    message: String,
    severity: Severity,
}

/// Apply `matcher` to every line of `lines`, at most one diagnostic per line.
///
/// Pure: safe to call from many tasks at once on different inputs.
pub fn scan_lines<L: LineSource + ?Sized>(
    matcher: &CompiledMatcher,
    document: &DocumentId,
    lines: &L,
) -> Vec<Diagnostic> {
    (0..lines.line_count())
        .filter_map(|index| {
            scan_line(matcher, lines.line(index)).map(|m| Diagnostic {
                document: document.clone(),
                line: index,
                start_column: m.start_column,
                end_column: m.end_column,
                message: m.message,
                severity: m.severity,
                source: matcher.source_label().to_string(),
            })
        })
        .collect()
}

/// Scan raw decoded text. Produces the same diagnostics as [`scan_lines`]
/// over a buffer holding the same content.
pub fn scan_text(matcher: &CompiledMatcher, document: &DocumentId, text: &str) -> Vec<Diagnostic> {
    scan_lines(matcher, document, &TextLines::new(text))
}

fn scan_line(matcher: &CompiledMatcher, line: &str) -> Option<LineMatch> {
    let captures = matcher.regex().captures(line)?;
    let whole = captures.get(0)?;

    let keyword = matcher.normalize_keyword(captures.get(1).map_or("", |m| m.as_str()));
    let trailing = captures.get(2).map_or("", |m| m.as_str().trim());
    let message = if trailing.is_empty() {
        keyword.clone()
    } else {
        format!("{keyword}: {trailing}")
    };

    let start_column = line[..whole.start()].chars().count();
    let end_column = start_column + whole.as_str().trim_end().chars().count();

    Some(LineMatch {
        start_column,
        end_column,
        message,
        severity: matcher.severity_for(&keyword),
    })
}

#[cfg(test)]
#[path = "lines_tests.rs"]
mod tests;
