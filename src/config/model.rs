use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::marker::{DEFAULT_PATTERN, KeywordRule};

use super::ScanConfig;

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Source label attached to diagnostics unless configured otherwise.
pub const DEFAULT_SOURCE: &str = "todo-guard";

/// Marker matching settings `[scan]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanSettings {
    /// Global enable flag. When off, a workspace scan leaves no diagnostics.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Match keywords with exact casing.
    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    /// Regex template with a `{keywords}` placeholder and two capture groups.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Label reported as the diagnostic source.
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            case_sensitive: true,
            pattern: default_pattern(),
            source: default_source(),
        }
    }
}

/// File scope settings `[scope]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopeSettings {
    /// Glob patterns a file must match. Empty means every file.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns that remove files from scope. Exclude wins over include.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Glob patterns of files that are tracked but never get diagnostics.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for ScopeSettings {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: default_exclude(),
            disabled: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub scan: ScanSettings,

    #[serde(default)]
    pub scope: ScopeSettings,

    /// Keyword rules `[[keywords]]`, in priority order.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<KeywordRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Some(CONFIG_VERSION.to_string()),
            scan: ScanSettings::default(),
            scope: ScopeSettings::default(),
            keywords: default_keywords(),
        }
    }
}

impl Config {
    /// Immutable scan snapshot consumed by the matcher, orchestrator and controller.
    #[must_use]
    pub fn to_scan_config(&self) -> ScanConfig {
        ScanConfig {
            enabled: self.scan.enabled,
            rules: self.keywords.clone(),
            include: self.scope.include.clone(),
            exclude: self.scope.exclude.clone(),
            disabled: self.scope.disabled.clone(),
            pattern_template: self.scan.pattern.clone(),
            case_sensitive: self.scan.case_sensitive,
            source_label: self.scan.source.clone(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

pub(crate) fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
    ]
}

pub(crate) fn default_keywords() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new("TODO", Severity::Warning),
        KeywordRule::new("FIXME", Severity::Error),
        KeywordRule::new("BUG", Severity::Error),
        KeywordRule::new("HACK", Severity::Warning),
        KeywordRule::new("XXX", Severity::Warning),
        KeywordRule::new("NOTE", Severity::Info),
    ]
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
