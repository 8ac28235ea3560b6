mod error_output;
mod json;
mod sarif;
mod text;

pub use error_output::{ErrorOutput, print_error};
pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
pub use text::{ColorMode, TextFormatter};

use std::path::{Path, PathBuf};

use crate::diagnostic::{Diagnostic, Severity};
use crate::document::DocumentId;
use crate::error::Result;

/// Trait for rendering a scan report in one output format.
pub trait DiagnosticFormatter {
    /// Format the report into a string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, report: &DiagnosticReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Diagnostics collected by one or more workspace scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// Paths are shown relative to this root when they live below it.
    pub root: Option<PathBuf>,
    pub files_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    #[must_use]
    pub const fn new(root: Option<PathBuf>, files_scanned: usize, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            root,
            files_scanned,
            diagnostics,
        }
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any diagnostic is at or above `threshold`.
    #[must_use]
    pub fn has_at_least(&self, threshold: Severity) -> bool {
        self.diagnostics.iter().any(|d| d.severity >= threshold)
    }

    /// Display form of a document: root-relative with `/` separators for
    /// files under the root, absolute otherwise.
    #[must_use]
    pub fn display_path(&self, document: &DocumentId) -> String {
        match document.as_path() {
            Some(path) => relative_display(self.root.as_deref(), path),
            None => document.to_string(),
        }
    }
}

fn relative_display(root: Option<&Path>, path: &Path) -> String {
    root.and_then(|root| path.strip_prefix(root).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
