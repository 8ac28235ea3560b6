use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Files currently considered in scope.
///
/// Rebuilt by every full scan, then maintained incrementally by create and
/// delete events.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackedScope {
    files: BTreeSet<PathBuf>,
}

impl TrackedScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.files.insert(path)
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Remove `path` and, when it names a directory, every tracked file below it.
    ///
    /// Matching is per path component, so deleting `foo` leaves `foo2/a.rs` alone.
    /// Returns the removed files.
    pub fn remove_under(&mut self, path: &Path) -> Vec<PathBuf> {
        let removed: Vec<PathBuf> = self
            .files
            .iter()
            .filter(|tracked| tracked.starts_with(path))
            .cloned()
            .collect();
        for file in &removed {
            self.files.remove(file);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
#[path = "tracked_tests.rs"]
mod tests;
