//! Full workspace scan.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::diagnostic::{Diagnostic, DiagnosticStore};
use crate::document::DocumentId;
use crate::error::Result;
use crate::marker::{CompiledMatcher, scan_lines, scan_text};
use crate::scanner::{ScopeFilter, TrackedScope, has_binary_extension, looks_binary};

use super::Workspace;

/// Files read concurrently within one batch.
pub const BATCH_SIZE: usize = 50;

/// Mutable state shared by full scans and incremental updates.
///
/// Incremental updates go through [`ScanState::set_document`] and
/// [`ScanState::remove_document`] so that a full scan in flight does not
/// later overwrite them with a result read before the update.
#[derive(Debug)]
pub struct ScanState {
    pub store: DiagnosticStore,
    pub tracked: TrackedScope,
    generation: u64,
    in_flight: Option<u64>,
    touched: HashSet<DocumentId>,
}

impl ScanState {
    #[must_use]
    pub fn new(store: DiagnosticStore) -> Self {
        Self {
            store,
            tracked: TrackedScope::new(),
            generation: 0,
            in_flight: None,
            touched: HashSet::new(),
        }
    }

    /// Store a fresh scan result for `document`. Publishes only if the
    /// document has diagnostics now or had some before.
    pub fn set_document(&mut self, document: DocumentId, diagnostics: Vec<Diagnostic>) {
        self.mark_touched(&document);
        if !diagnostics.is_empty() || self.store.contains(&document) {
            self.store.set(document, diagnostics);
        }
    }

    /// Drop the diagnostics of `document`, if any.
    pub fn remove_document(&mut self, document: &DocumentId) {
        self.mark_touched(document);
        if self.store.contains(document) {
            self.store.remove(document);
        }
    }

    fn mark_touched(&mut self, document: &DocumentId) {
        if self.in_flight.is_some() {
            self.touched.insert(document.clone());
        }
    }

    fn begin_scan(&mut self) -> u64 {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.touched.clear();
        self.store.clear_all();
        self.tracked.clear();
        self.generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight == Some(generation)
    }

    /// Documents updated incrementally since the scan began.
    fn finish_scan(&mut self) -> HashSet<DocumentId> {
        self.in_flight = None;
        std::mem::take(&mut self.touched)
    }

    /// Back to the cleared state, unless a newer scan has taken over.
    fn abandon_scan(&mut self, generation: u64) {
        if !self.is_current(generation) {
            return;
        }
        self.finish_scan();
        self.tracked.clear();
        if !self.store.is_empty() {
            self.store.clear_all();
        }
    }
}

/// How a full scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed(ScanSummary),
    /// The global enable flag is off; the store was left empty.
    Disabled,
    /// Superseded or torn down; the store was left in its cleared state.
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Candidates matched by the scope globs, binary files included.
    pub candidates: usize,
    /// Documents whose content was scanned, open buffers included.
    pub scanned: usize,
    /// Candidates skipped as binary, unreadable or disabled.
    pub skipped: usize,
    pub diagnostics: usize,
}

/// Result of scanning one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentScan {
    Scanned(Vec<Diagnostic>),
    Binary,
    Unreadable,
}

/// Scan a single document, preferring its open buffer over disk content.
///
/// Read and decode failures are reported as [`DocumentScan::Unreadable`],
/// never as errors.
pub async fn scan_document(
    workspace: &dyn Workspace,
    matcher: &CompiledMatcher,
    document: &DocumentId,
) -> DocumentScan {
    if let Some(buffer) = workspace.open_buffer(document) {
        return DocumentScan::Scanned(scan_lines(matcher, document, &buffer));
    }
    let Some(path) = document.as_path() else {
        return DocumentScan::Unreadable;
    };
    if has_binary_extension(path) {
        return DocumentScan::Binary;
    }
    let bytes = match workspace.read_file_bytes(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "skipping unreadable file");
            return DocumentScan::Unreadable;
        }
    };
    if looks_binary(&bytes) {
        return DocumentScan::Binary;
    }
    match String::from_utf8(bytes) {
        Ok(text) => DocumentScan::Scanned(scan_text(matcher, document, &text)),
        Err(_) => {
            tracing::debug!(path = %path.display(), "skipping file that is not valid UTF-8");
            DocumentScan::Unreadable
        }
    }
}

/// Rescan the whole workspace into `state`.
///
/// The store and tracked scope are cleared first and the candidates are
/// tracked as soon as they are enumerated. Diagnostics are staged and
/// committed in one step only if `cancel` is still live at that point, so a
/// cancelled scan leaves the cleared state behind and nothing else. Staged
/// results for documents that were deleted or rescanned incrementally while
/// the scan ran are dropped at commit.
///
/// # Errors
/// Returns an error if a scope glob is invalid or the workspace root cannot
/// be enumerated. Per-file failures are skipped.
pub async fn scan_workspace(
    state: &Mutex<ScanState>,
    workspace: &dyn Workspace,
    config: &ScanConfig,
    cancel: &CancellationToken,
) -> Result<ScanOutcome> {
    let generation = lock(state).begin_scan();
    let result = run_pass(state, generation, workspace, config, cancel).await;
    if !matches!(result, Ok(ScanOutcome::Completed(_))) {
        lock(state).abandon_scan(generation);
    }
    result
}

async fn run_pass(
    state: &Mutex<ScanState>,
    generation: u64,
    workspace: &dyn Workspace,
    config: &ScanConfig,
    cancel: &CancellationToken,
) -> Result<ScanOutcome> {
    if !config.enabled {
        tracing::debug!("marker scanning disabled");
        return Ok(ScanOutcome::Disabled);
    }

    let matcher = CompiledMatcher::compile_or_disabled(config);
    let filter = ScopeFilter::from_config(config)?;
    let root = workspace.root();

    if cancel.is_cancelled() {
        return Ok(cancelled());
    }
    let candidates = tokio::select! {
        biased;
        () = cancel.cancelled() => return Ok(cancelled()),
        files = workspace.enumerate_files(&filter) => files?,
    };
    tracing::debug!(root = %root.display(), candidates = candidates.len(), "enumerated workspace");

    {
        let mut state = lock(state);
        if cancel.is_cancelled() || !state.is_current(generation) {
            return Ok(cancelled());
        }
        for path in &candidates {
            state.tracked.insert(path.clone());
        }
    }

    let mut summary = ScanSummary {
        candidates: candidates.len(),
        ..ScanSummary::default()
    };
    let mut staged: Vec<(DocumentId, Vec<Diagnostic>)> = Vec::new();

    for batch in candidates.chunks(BATCH_SIZE) {
        if cancel.is_cancelled() {
            return Ok(cancelled());
        }
        let scans = batch.iter().map(|path| {
            let document = DocumentId::file(path.clone());
            let matcher = &matcher;
            let filter = &filter;
            async move {
                if filter.is_disabled(root, &document) {
                    return (document, None);
                }
                match scan_document(workspace, matcher, &document).await {
                    DocumentScan::Scanned(diagnostics) => (document, Some(diagnostics)),
                    DocumentScan::Binary | DocumentScan::Unreadable => (document, None),
                }
            }
        });
        for (document, result) in join_all(scans).await {
            match result {
                Some(diagnostics) => {
                    summary.scanned += 1;
                    staged.push((document, diagnostics));
                }
                None => summary.skipped += 1,
            }
        }
    }
    if cancel.is_cancelled() {
        return Ok(cancelled());
    }

    let covered: HashSet<&Path> = candidates.iter().map(PathBuf::as_path).collect();
    for buffer in workspace.open_buffers() {
        let uncovered = buffer.id.as_path().is_none_or(|path| !covered.contains(path));
        if uncovered && !filter.is_disabled(root, &buffer.id) {
            summary.scanned += 1;
            staged.push((buffer.id.clone(), scan_lines(&matcher, &buffer.id, &buffer)));
        }
    }

    let mut state = lock(state);
    if cancel.is_cancelled() || !state.is_current(generation) {
        return Ok(cancelled());
    }
    let touched = state.finish_scan();
    for (document, diagnostics) in staged {
        let deleted = document
            .as_path()
            .is_some_and(|path| covered.contains(path) && !state.tracked.contains(path));
        if deleted || touched.contains(&document) {
            tracing::debug!(%document, "staged result superseded during scan");
            continue;
        }
        summary.diagnostics += diagnostics.len();
        if !diagnostics.is_empty() {
            state.store.set(document, diagnostics);
        }
    }
    let tracked = state.tracked.len();
    drop(state);

    tracing::info!(
        root = %root.display(),
        files = summary.scanned,
        tracked,
        skipped = summary.skipped,
        diagnostics = summary.diagnostics,
        "workspace scan finished"
    );
    Ok(ScanOutcome::Completed(summary))
}

fn lock(state: &Mutex<ScanState>) -> MutexGuard<'_, ScanState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn cancelled() -> ScanOutcome {
    tracing::debug!("workspace scan cancelled");
    ScanOutcome::Cancelled
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
