//! Document identities and live editor buffers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Identity of a document that can carry diagnostics.
///
/// On-disk files are identified by their absolute path. Virtual resources
/// (unsaved "untitled" editors, generated views) carry an opaque name and are
/// never part of the glob-scoped file set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum DocumentId {
    File(PathBuf),
    Untitled(String),
}

impl DocumentId {
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    #[must_use]
    pub fn untitled(name: impl Into<String>) -> Self {
        Self::Untitled(name.into())
    }

    /// Path of an on-disk document, `None` for virtual resources.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Untitled(_) => None,
        }
    }

    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Untitled(name) => write!(f, "untitled:{name}"),
        }
    }
}

impl From<PathBuf> for DocumentId {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for DocumentId {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

/// Snapshot of an editor buffer, including unsaved edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBuffer {
    pub id: DocumentId,
    pub lines: Vec<String>,
}

impl OpenBuffer {
    #[must_use]
    pub const fn new(id: DocumentId, lines: Vec<String>) -> Self {
        Self { id, lines }
    }

    /// Build a buffer from raw text, splitting on `\n` and `\r\n` the same way
    /// an editor would present it line by line.
    #[must_use]
    pub fn from_text(id: DocumentId, text: &str) -> Self {
        let lines = crate::marker::split_lines(text)
            .map(str::to_string)
            .collect();
        Self { id, lines }
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
