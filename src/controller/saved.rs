use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::document::DocumentId;

/// Documents saved through the editor within the last `window`.
///
/// A watcher change event for such a document is the echo of the save's own
/// disk write and is dropped. Entries expire on their own.
#[derive(Debug)]
pub struct RecentlySaved {
    window: Duration,
    saved_at: Mutex<HashMap<DocumentId, Instant>>,
}

impl RecentlySaved {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            saved_at: Mutex::new(HashMap::new()),
        }
    }

    pub fn mark(&self, document: &DocumentId) {
        let now = Instant::now();
        let mut saved_at = self.saved_at.lock().unwrap_or_else(PoisonError::into_inner);
        saved_at.retain(|_, at| now.duration_since(*at) < self.window);
        saved_at.insert(document.clone(), now);
    }

    #[must_use]
    pub fn contains(&self, document: &DocumentId) -> bool {
        self.saved_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(document)
            .is_some_and(|at| at.elapsed() < self.window)
    }

    pub fn clear(&self) {
        self.saved_at
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
#[path = "saved_tests.rs"]
mod tests;
