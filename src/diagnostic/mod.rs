mod sink;
mod store;

pub use sink::{DiagnosticSink, NullSink, RecordingSink, SinkEvent};
pub use store::DiagnosticStore;

use serde::{Deserialize, Serialize};

use crate::document::DocumentId;

/// Severity attached to a keyword rule and to every diagnostic it produces.
///
/// Variants are ordered from least to most severe so `--fail-on` style
/// comparisons can use `>=`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hint,
    Info,
    #[default]
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Error, Self::Warning, Self::Info, Self::Hint];

    /// Parse a severity, falling back to [`Severity::Warning`] for anything
    /// unrecognised.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or(Self::Warning)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" | "information" => Ok(Self::Info),
            "hint" => Ok(Self::Hint),
            _ => Err(format!("Unknown severity: {s}")),
        }
    }
}

/// A single marker occurrence.
///
/// Lines are 0-based; columns count Unicode scalar values from the start of
/// the line. `end_column` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub document: DocumentId,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
    pub source: String,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
