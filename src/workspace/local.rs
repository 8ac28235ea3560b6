use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::document::{DocumentId, OpenBuffer};
use crate::error::{Result, TodoGuardError};
use crate::scanner::{DirectoryScanner, FileScanner, ScopeFilter};

use super::{BufferRegistry, Workspace};

/// Workspace backed by the local file system.
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    root: PathBuf,
    buffers: BufferRegistry,
}

impl LocalWorkspace {
    /// Open a workspace rooted at `root`.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or cannot be resolved.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = dunce::canonicalize(root.as_ref()).map_err(|source| TodoGuardError::FileRead {
            path: root.as_ref().to_path_buf(),
            source,
        })?;
        Ok(Self {
            root,
            buffers: BufferRegistry::new(),
        })
    }

    /// Handle onto the open buffer table.
    #[must_use]
    pub const fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }
}

#[async_trait]
impl Workspace for LocalWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn enumerate_files(&self, filter: &ScopeFilter) -> Result<Vec<PathBuf>> {
        let root = self.root.clone();
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || DirectoryScanner::new(&filter).scan(&root))
            .await
            .map_err(|err| TodoGuardError::Io(io::Error::other(err)))?
    }

    async fn read_file_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    fn open_buffers(&self) -> Vec<OpenBuffer> {
        self.buffers.all()
    }

    fn open_buffer(&self, document: &DocumentId) -> Option<OpenBuffer> {
        self.buffers.get(document)
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
