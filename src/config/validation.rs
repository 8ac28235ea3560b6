//! Configuration semantic validation.
//!
//! Scanning itself tolerates bad settings (unknown severities fall back to
//! `warning`, a broken template disables matching). These checks are the
//! strict variant used by `config validate` and at CLI start-up.

use crate::config::Config;
use crate::diagnostic::Severity;
use crate::marker::CompiledMatcher;
use crate::{Result, TodoGuardError};

/// Validates semantic correctness of a configuration.
///
/// # Errors
/// Returns the first problem found: an empty keyword, an unknown severity,
/// an invalid glob, or a pattern template that does not compile into exactly
/// two capture groups.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    validate_keywords(config)?;
    validate_glob_patterns(config)?;
    CompiledMatcher::compile(&config.to_scan_config())?;
    Ok(())
}

fn validate_keywords(config: &Config) -> Result<()> {
    for (i, rule) in config.keywords.iter().enumerate() {
        if rule.keyword.trim().is_empty() {
            return Err(TodoGuardError::Config(format!(
                "keywords[{i}].keyword must not be empty"
            )));
        }
        if let Err(e) = rule.severity.parse::<Severity>() {
            return Err(TodoGuardError::Config(format!(
                "keywords[{i}].severity: {e} (expected error, warning, info or hint)"
            )));
        }
    }
    Ok(())
}

fn validate_glob_patterns(config: &Config) -> Result<()> {
    let scope = &config.scope;
    for pattern in scope.include.iter().chain(&scope.exclude).chain(&scope.disabled) {
        globset::Glob::new(pattern).map_err(|e| TodoGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
