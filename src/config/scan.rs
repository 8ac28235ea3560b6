use crate::marker::{DEFAULT_PATTERN, KeywordRule};

use super::model::{DEFAULT_SOURCE, default_exclude, default_keywords};

/// Everything a scan needs, captured at one point in time.
///
/// Never mutated once handed to a scan: a configuration change builds a new
/// value and swaps it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub enabled: bool,
    pub rules: Vec<KeywordRule>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub disabled: Vec<String>,
    pub pattern_template: String,
    pub case_sensitive: bool,
    pub source_label: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rules: default_keywords(),
            include: Vec::new(),
            exclude: default_exclude(),
            disabled: Vec::new(),
            pattern_template: DEFAULT_PATTERN.to_string(),
            case_sensitive: true,
            source_label: DEFAULT_SOURCE.to_string(),
        }
    }
}
