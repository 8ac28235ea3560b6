use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::diagnostic::Severity;
use crate::error::{Result, TodoGuardError};

/// Placeholder replaced by the keyword alternation in a pattern template.
pub const KEYWORDS_PLACEHOLDER: &str = "{keywords}";

/// Default template: group 1 is the keyword, group 2 the trailing text.
pub const DEFAULT_PATTERN: &str = r"\b({keywords})\b:?(.*)";

/// Two empty-width assertions that contradict each other; never matches.
const NEVER_MATCH: &str = r"(\b\B)(\b\B)";

/// Capture groups a template must define, not counting the implicit group 0.
const REQUIRED_GROUPS: usize = 2;

/// A marker keyword and the severity reported for it.
///
/// Severity is kept as written in the configuration so a typo degrades to
/// [`Severity::Warning`] at compile time instead of rejecting the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    #[serde(default = "default_severity")]
    pub severity: String,
}

fn default_severity() -> String {
    Severity::Warning.as_str().to_string()
}

impl KeywordRule {
    #[must_use]
    pub fn new(keyword: impl Into<String>, severity: Severity) -> Self {
        Self {
            keyword: keyword.into(),
            severity: severity.as_str().to_string(),
        }
    }
}

/// Regex plus severity lookup built from one [`ScanConfig`].
///
/// Building is comparatively expensive (escaping, regex compilation), so one
/// matcher is shared by every file of a scan pass. A matcher is never
/// modified after construction; a configuration change produces a new one.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
    severity_by_key: HashMap<String, Severity>,
    case_sensitive: bool,
    source_label: String,
}

impl CompiledMatcher {
    /// Compile `config` into a matcher.
    ///
    /// An empty keyword list is not an error: the result simply never matches.
    ///
    /// # Errors
    /// Returns [`TodoGuardError::InvalidTemplate`] if the template lacks the
    /// `{keywords}` placeholder, does not compile, or does not define exactly
    /// two capture groups.
    pub fn compile(config: &ScanConfig) -> Result<Self> {
        let keywords: Vec<&KeywordRule> = config
            .rules
            .iter()
            .filter(|rule| !rule.keyword.trim().is_empty())
            .collect();
        if keywords.is_empty() {
            return Ok(Self::disabled(config));
        }

        let template = &config.pattern_template;
        if !template.contains(KEYWORDS_PLACEHOLDER) {
            return Err(invalid_template(
                template,
                format!("missing the {KEYWORDS_PLACEHOLDER} placeholder"),
            ));
        }

        let alternation = keywords
            .iter()
            .map(|rule| regex::escape(rule.keyword.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = template.replace(KEYWORDS_PLACEHOLDER, &format!("(?:{alternation})"));

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!config.case_sensitive)
            .build()
            .map_err(|e| invalid_template(template, e.to_string()))?;

        let groups = regex.captures_len() - 1;
        if groups != REQUIRED_GROUPS {
            return Err(invalid_template(
                template,
                format!(
                    "expected exactly {REQUIRED_GROUPS} capture groups (keyword, trailing text), found {groups}"
                ),
            ));
        }

        let mut severity_by_key = HashMap::with_capacity(keywords.len());
        for rule in keywords {
            if rule.severity.parse::<Severity>().is_err() {
                tracing::warn!(
                    keyword = %rule.keyword,
                    severity = %rule.severity,
                    "unknown severity, using warning"
                );
            }
            let key = normalize(rule.keyword.trim(), config.case_sensitive);
            severity_by_key.insert(key, Severity::parse_lossy(&rule.severity));
        }

        Ok(Self {
            regex,
            severity_by_key,
            case_sensitive: config.case_sensitive,
            source_label: config.source_label.clone(),
        })
    }

    /// Compile `config`, reporting a configuration error once and returning a
    /// matcher that never matches instead of failing.
    #[must_use]
    pub fn compile_or_disabled(config: &ScanConfig) -> Self {
        Self::compile(config).unwrap_or_else(|err| {
            tracing::error!(error = %err, "marker scanning disabled until the configuration is fixed");
            Self::disabled(config)
        })
    }

    /// A matcher whose regex can never match.
    ///
    /// # Panics
    /// Never: the pattern is a compile-time constant known to be valid.
    #[must_use]
    pub fn disabled(config: &ScanConfig) -> Self {
        // SAFETY: NEVER_MATCH is a constant with valid syntax
        let regex = Regex::new(NEVER_MATCH).expect("valid pattern");
        Self {
            regex,
            severity_by_key: HashMap::new(),
            case_sensitive: config.case_sensitive,
            source_label: config.source_label.clone(),
        }
    }

    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    /// Lookup key for a matched keyword: upper-cased when matching ignores case.
    #[must_use]
    pub fn normalize_keyword(&self, keyword: &str) -> String {
        normalize(keyword, self.case_sensitive)
    }

    /// Severity for a normalized keyword, [`Severity::Warning`] if unknown.
    #[must_use]
    pub fn severity_for(&self, normalized_keyword: &str) -> Severity {
        self.severity_by_key
            .get(normalized_keyword)
            .copied()
            .unwrap_or_default()
    }
}

fn normalize(keyword: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        keyword.to_string()
    } else {
        keyword.to_uppercase()
    }
}

fn invalid_template(template: &str, reason: String) -> TodoGuardError {
    TodoGuardError::InvalidTemplate {
        template: template.to_string(),
        reason,
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
