use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::document::{DocumentId, OpenBuffer};
use crate::error::Result;
use crate::scanner::ScopeFilter;

use super::{BufferRegistry, Workspace};

/// In-memory workspace for embedding hosts and tests.
///
/// Files are keyed by absolute path under the root. Optional enumeration
/// and per-file read delays make slow hosts reproducible.
#[derive(Debug)]
pub struct MemoryWorkspace {
    root: PathBuf,
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    buffers: BufferRegistry,
    enumerate_delay: Option<Duration>,
    read_delays: HashMap<PathBuf, Duration>,
    reads: AtomicUsize,
}

impl MemoryWorkspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: RwLock::new(BTreeMap::new()),
            buffers: BufferRegistry::new(),
            enumerate_delay: None,
            read_delays: HashMap::new(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Builder form of [`MemoryWorkspace::write_file`].
    #[must_use]
    pub fn with_file(self, relative: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.write_file(relative, content);
        self
    }

    #[must_use]
    pub fn with_enumerate_delay(mut self, delay: Duration) -> Self {
        self.enumerate_delay = Some(delay);
        self
    }

    /// Delay reads of one file. The content is taken when the read starts
    /// and returned after `delay`, like a slow disk.
    #[must_use]
    pub fn with_read_delay(mut self, relative: impl AsRef<Path>, delay: Duration) -> Self {
        self.read_delays.insert(self.root.join(relative), delay);
        self
    }

    /// Create or overwrite a file; returns its absolute path.
    pub fn write_file(&self, relative: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> PathBuf {
        let path = self.root.join(relative);
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.clone(), content.into());
        path
    }

    /// Remove a file, or every file below a directory.
    pub fn remove(&self, relative: impl AsRef<Path>) {
        let path = self.root.join(relative);
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|file, _| !file.starts_with(&path));
    }

    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    #[must_use]
    pub const fn buffers(&self) -> &BufferRegistry {
        &self.buffers
    }

    /// Number of `read_file_bytes` calls served so far.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn enumerate_files(&self, filter: &ScopeFilter) -> Result<Vec<PathBuf>> {
        if let Some(delay) = self.enumerate_delay {
            tokio::time::sleep(delay).await;
        }
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files
            .keys()
            .filter(|path| {
                path.strip_prefix(&self.root)
                    .is_ok_and(|relative| filter.is_in_scope(relative))
            })
            .cloned()
            .collect())
    }

    async fn read_file_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let content = self
            .files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned();
        if let Some(delay) = self.read_delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        content.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn open_buffers(&self) -> Vec<OpenBuffer> {
        self.buffers.all()
    }

    fn open_buffer(&self, document: &DocumentId) -> Option<OpenBuffer> {
        self.buffers.get(document)
    }
}
