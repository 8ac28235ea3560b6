use std::sync::Mutex;

use crate::document::DocumentId;

use super::Diagnostic;

/// Destination diagnostics are rendered into (problem panel, console, LSP client).
///
/// Calls arrive while the store's lock is held, so implementations must not
/// call back into the controller.
pub trait DiagnosticSink: Send + Sync {
    /// Replace every diagnostic shown for `document`.
    fn publish(&self, document: &DocumentId, diagnostics: &[Diagnostic]);

    /// Remove everything shown for `document`.
    fn clear(&self, document: &DocumentId);

    /// Remove everything shown for every document.
    fn clear_all(&self);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn publish(&self, _document: &DocumentId, _diagnostics: &[Diagnostic]) {}

    fn clear(&self, _document: &DocumentId) {}

    fn clear_all(&self) {}
}

/// One call received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Publish {
        document: DocumentId,
        diagnostics: Vec<Diagnostic>,
    },
    Clear(DocumentId),
    ClearAll,
}

/// Sink that keeps a log of every call, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of `publish` calls received for `document`.
    #[must_use]
    pub fn publish_count(&self, document: &DocumentId) -> usize {
        self.events()
            .iter()
            .filter(|event| {
                matches!(event, SinkEvent::Publish { document: d, .. } if d == document)
            })
            .count()
    }

    fn record(&self, event: SinkEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DiagnosticSink for RecordingSink {
    fn publish(&self, document: &DocumentId, diagnostics: &[Diagnostic]) {
        self.record(SinkEvent::Publish {
            document: document.clone(),
            diagnostics: diagnostics.to_vec(),
        });
    }

    fn clear(&self, document: &DocumentId) {
        self.record(SinkEvent::Clear(document.clone()));
    }

    fn clear_all(&self) {
        self.record(SinkEvent::ClearAll);
    }
}
