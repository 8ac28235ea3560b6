use std::collections::BTreeMap;
use std::sync::Arc;

use crate::document::DocumentId;

use super::{Diagnostic, DiagnosticSink};

/// Diagnostics per document, mirrored into a [`DiagnosticSink`].
///
/// Entries are always replaced wholesale: a rescan of a document produces its
/// complete diagnostic list, never a patch. A document with no diagnostics
/// has no entry.
pub struct DiagnosticStore {
    entries: BTreeMap<DocumentId, Vec<Diagnostic>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl DiagnosticStore {
    #[must_use]
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            entries: BTreeMap::new(),
            sink,
        }
    }

    /// Replace the diagnostics of `document` and publish them.
    pub fn set(&mut self, document: DocumentId, diagnostics: Vec<Diagnostic>) {
        self.sink.publish(&document, &diagnostics);
        if diagnostics.is_empty() {
            self.entries.remove(&document);
        } else {
            self.entries.insert(document, diagnostics);
        }
    }

    /// Drop the diagnostics of `document`.
    pub fn remove(&mut self, document: &DocumentId) {
        self.entries.remove(document);
        self.sink.clear(document);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.sink.clear_all();
    }

    #[must_use]
    pub fn get(&self, document: &DocumentId) -> &[Diagnostic] {
        self.entries.get(document).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, document: &DocumentId) -> bool {
        self.entries.contains_key(document)
    }

    /// Number of documents with at least one diagnostic.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All diagnostics ordered by document, then line.
    #[must_use]
    pub fn all(&self) -> Vec<Diagnostic> {
        self.entries.values().flatten().cloned().collect()
    }
}

impl std::fmt::Debug for DiagnosticStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
