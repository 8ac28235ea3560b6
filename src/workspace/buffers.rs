use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::document::{DocumentId, OpenBuffer};

/// Shared table of open editor buffers.
///
/// Cloning yields another handle onto the same table, so the host can keep
/// updating buffers while the workspace hands snapshots to scans.
#[derive(Debug, Clone, Default)]
pub struct BufferRegistry {
    buffers: Arc<RwLock<HashMap<DocumentId, OpenBuffer>>>,
}

impl BufferRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a buffer.
    pub fn open(&self, buffer: OpenBuffer) {
        self.buffers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(buffer.id.clone(), buffer);
    }

    /// Replace the text of `document`, opening it if needed.
    pub fn update(&self, document: &DocumentId, text: &str) {
        self.open(OpenBuffer::from_text(document.clone(), text));
    }

    pub fn close(&self, document: &DocumentId) -> Option<OpenBuffer> {
        self.buffers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(document)
    }

    #[must_use]
    pub fn get(&self, document: &DocumentId) -> Option<OpenBuffer> {
        self.buffers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(document)
            .cloned()
    }

    #[must_use]
    pub fn is_open(&self, document: &DocumentId) -> bool {
        self.buffers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(document)
    }

    /// All buffers ordered by document.
    #[must_use]
    pub fn all(&self) -> Vec<OpenBuffer> {
        let mut buffers: Vec<OpenBuffer> = self
            .buffers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        buffers.sort_by(|a, b| a.id.cmp(&b.id));
        buffers
    }
}

#[cfg(test)]
#[path = "buffers_tests.rs"]
mod tests;
