mod binary;
mod filter;
mod tracked;

pub use binary::{SNIFF_LEN, has_binary_extension, is_binary, looks_binary};
pub use filter::{FileFilter, ScopeFilter, brace_union, is_in_scope};
pub use tracked::TrackedScope;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Trait for scanning directories and finding candidate files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Walks a workspace root and yields absolute paths of in-scope files.
///
/// Directories matched by an exclude pattern of the form `dir/**` are pruned
/// without descending into them.
pub struct DirectoryScanner<'a> {
    filter: &'a ScopeFilter,
}

impl<'a> DirectoryScanner<'a> {
    #[must_use]
    pub const fn new(filter: &'a ScopeFilter) -> Self {
        Self { filter }
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let relative = |path: &Path| path.strip_prefix(root).map(Path::to_path_buf).ok();

        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || relative(e.path()).is_none_or(|rel| !self.filter.is_excluded_dir(&rel))
            })
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| relative(e.path()).is_some_and(|rel| self.filter.should_include(&rel)))
            .map(walkdir::DirEntry::into_path)
            .collect();
        files.sort();
        files
    }
}

impl FileScanner for DirectoryScanner<'_> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("workspace root is not a directory: {}", root.display()),
            )
            .into());
        }
        Ok(self.scan_impl(root))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
