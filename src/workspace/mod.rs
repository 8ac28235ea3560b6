//! Capabilities the scanning engine needs from its host: file enumeration,
//! raw reads and live editor buffers.

mod buffers;
mod local;
mod memory;
pub mod orchestrator;

pub use buffers::BufferRegistry;
pub use local::LocalWorkspace;
pub use memory::MemoryWorkspace;
pub use orchestrator::{DocumentScan, ScanOutcome, ScanState, ScanSummary, scan_document, scan_workspace};

pub use crate::document::{DocumentId, OpenBuffer};

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::scanner::ScopeFilter;

/// Host workspace the engine scans.
///
/// Paths handed out and accepted are absolute; scope globs are evaluated on
/// paths relative to [`Workspace::root`].
#[async_trait]
pub trait Workspace: Send + Sync {
    fn root(&self) -> &Path;

    /// Every file under the root that `filter` admits, sorted.
    ///
    /// # Errors
    /// Returns an error if the root itself cannot be enumerated.
    async fn enumerate_files(&self, filter: &ScopeFilter) -> Result<Vec<PathBuf>>;

    /// Raw file content. Callers treat any error as "skip this file".
    async fn read_file_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Snapshot of every open editor buffer, including unsaved edits.
    fn open_buffers(&self) -> Vec<OpenBuffer>;

    fn open_buffer(&self, document: &DocumentId) -> Option<OpenBuffer>;
}
