use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::ScanConfig;
use crate::document::DocumentId;
use crate::error::{Result, TodoGuardError};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Include/exclude glob scope, evaluated on workspace-relative paths.
///
/// Glob semantics: `**` spans any number of path segments (including none),
/// `*` and `?` never cross a `/`, and dotfiles are not special.
#[derive(Debug, Clone)]
pub struct ScopeFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
    disabled: GlobSet,
    /// Prefixes of exclude patterns ending in `/**`; matching directories are pruned whole.
    excluded_dirs: GlobSet,
}

impl ScopeFilter {
    /// Build a filter. An empty include list admits every path.
    ///
    /// # Errors
    /// Returns an error if any pattern is invalid.
    pub fn new(include: &[String], exclude: &[String], disabled: &[String]) -> Result<Self> {
        let include = if include.is_empty() {
            None
        } else {
            Some(build_glob_set(include)?)
        };
        let dir_prefixes: Vec<String> = exclude
            .iter()
            .filter_map(|p| p.strip_suffix("/**"))
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            include,
            exclude: build_glob_set(exclude)?,
            disabled: build_glob_set(disabled)?,
            excluded_dirs: build_glob_set(&dir_prefixes)?,
        })
    }

    /// # Errors
    /// Returns an error if any scope pattern in `config` is invalid.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(&config.include, &config.exclude, &config.disabled)
    }

    /// True iff `relative` matches an include glob (or there are none) and no exclude glob.
    #[must_use]
    pub fn is_in_scope(&self, relative: &Path) -> bool {
        let normalized = normalize(relative);
        let included = self
            .include
            .as_ref()
            .is_none_or(|set| set.is_match(&normalized));
        included && !self.exclude.is_match(&normalized)
    }

    /// Scope check for a live document: virtual resources and files outside
    /// `root` are never in scope.
    #[must_use]
    pub fn is_document_in_scope(&self, root: &Path, document: &DocumentId) -> bool {
        document
            .as_path()
            .and_then(|path| path.strip_prefix(root).ok())
            .is_some_and(|relative| self.is_in_scope(relative))
    }

    /// Whether diagnostics are switched off for this document.
    #[must_use]
    pub fn is_disabled(&self, root: &Path, document: &DocumentId) -> bool {
        document
            .as_path()
            .and_then(|path| path.strip_prefix(root).ok())
            .is_some_and(|relative| self.disabled.is_match(normalize(relative)))
    }

    /// Whether a directory can be skipped entirely during enumeration.
    #[must_use]
    pub fn is_excluded_dir(&self, relative: &Path) -> bool {
        self.excluded_dirs.is_match(normalize(relative))
    }
}

impl FileFilter for ScopeFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.is_in_scope(path)
    }
}

/// Stand-alone scope check over raw pattern lists.
///
/// # Errors
/// Returns an error if any pattern is invalid.
pub fn is_in_scope(path: &str, include: &[String], exclude: &[String]) -> Result<bool> {
    Ok(ScopeFilter::new(include, exclude, &[])?.is_in_scope(Path::new(path)))
}

/// Collapse patterns into one brace alternation, `{a,b,c}`, as accepted by
/// bulk file-search APIs. `None` for an empty list.
#[must_use]
pub fn brace_union(patterns: &[String]) -> Option<String> {
    match patterns {
        [] => None,
        [single] => Some(single.clone()),
        many => Some(format!("{{{}}}", many.join(","))),
    }
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn build_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| TodoGuardError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(build_glob(pattern)?);
    }
    builder.build().map_err(|e| TodoGuardError::InvalidPattern {
        pattern: "combined patterns".to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
