//! Incremental update controller.
//!
//! Keeps the diagnostic store and the tracked scope consistent with editor
//! and file system events between full scans. Per-file rescans are
//! debounced, saves bypass the debounce, and full rescans are single-flight.

mod saved;
mod task;
pub mod watcher;

pub use saved::RecentlySaved;
pub use task::{Debouncer, TaskSlot, delayed};
pub use watcher::{WatchEvent, translate_event, watch_paths};

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::ScanConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink, DiagnosticStore};
use crate::document::DocumentId;
use crate::error::Result;
use crate::marker::CompiledMatcher;
use crate::scanner::{ScopeFilter, has_binary_extension};
use crate::workspace::{DocumentScan, ScanOutcome, ScanState, Workspace, scan_document, scan_workspace};

/// Delay before a per-file rescan after the last text change.
pub const DEFAULT_CHANGE_DELAY: Duration = Duration::from_millis(300);
/// Delay before a full rescan after the last configuration change.
pub const DEFAULT_CONFIG_DELAY: Duration = Duration::from_millis(400);
/// How long a save suppresses the watcher's echo of it.
pub const DEFAULT_SAVE_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub change_delay: Duration,
    pub config_delay: Duration,
    pub save_window: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            change_delay: DEFAULT_CHANGE_DELAY,
            config_delay: DEFAULT_CONFIG_DELAY,
            save_window: DEFAULT_SAVE_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    Created,
    Changed,
    Deleted,
}

/// File system event as reported by a watcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEvent {
    pub kind: FileEventKind,
    pub path: PathBuf,
}

impl FileEvent {
    #[must_use]
    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileEventKind::Created,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn changed(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileEventKind::Changed,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: FileEventKind::Deleted,
            path: path.into(),
        }
    }
}

/// One configuration version with its lazily built matcher and scope.
struct ConfigSnapshot {
    config: Arc<ScanConfig>,
    matcher: OnceLock<Arc<CompiledMatcher>>,
    filter: OnceLock<Option<Arc<ScopeFilter>>>,
}

impl ConfigSnapshot {
    fn new(config: ScanConfig) -> Self {
        Self {
            config: Arc::new(config),
            matcher: OnceLock::new(),
            filter: OnceLock::new(),
        }
    }

    fn matcher(&self) -> Arc<CompiledMatcher> {
        Arc::clone(
            self.matcher
                .get_or_init(|| Arc::new(CompiledMatcher::compile_or_disabled(&self.config))),
        )
    }

    /// `None` when a scope glob is invalid; reported once per version.
    fn filter(&self) -> Option<Arc<ScopeFilter>> {
        self.filter
            .get_or_init(|| match ScopeFilter::from_config(&self.config) {
                Ok(filter) => Some(Arc::new(filter)),
                Err(err) => {
                    tracing::error!(error = %err, "invalid scope configuration, file events ignored");
                    None
                }
            })
            .clone()
    }
}

struct Inner {
    workspace: Arc<dyn Workspace>,
    state: Mutex<ScanState>,
    snapshot: RwLock<Arc<ConfigSnapshot>>,
    options: ControllerOptions,
    changes: Debouncer<DocumentId>,
    config_rescan: TaskSlot,
    full_scan: TaskSlot,
    recently_saved: RecentlySaved,
    shutdown: CancellationToken,
}

/// Reacts to editor and file system events. Cheap to clone; clones share
/// the same state.
#[derive(Clone)]
pub struct UpdateController {
    inner: Arc<Inner>,
}

impl UpdateController {
    #[must_use]
    pub fn new(
        workspace: Arc<dyn Workspace>,
        sink: Arc<dyn DiagnosticSink>,
        config: ScanConfig,
        options: ControllerOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                workspace,
                state: Mutex::new(ScanState::new(DiagnosticStore::new(sink))),
                snapshot: RwLock::new(Arc::new(ConfigSnapshot::new(config))),
                options,
                changes: Debouncer::new(options.change_delay),
                config_rescan: TaskSlot::new(),
                full_scan: TaskSlot::new(),
                recently_saved: RecentlySaved::new(options.save_window),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Construct a controller and run the initial full scan.
    ///
    /// # Errors
    /// Returns an error if the initial scan cannot enumerate the workspace.
    pub async fn start(
        workspace: Arc<dyn Workspace>,
        sink: Arc<dyn DiagnosticSink>,
        config: ScanConfig,
        options: ControllerOptions,
    ) -> Result<Self> {
        let controller = Self::new(workspace, sink, config, options);
        controller.full_rescan().await?;
        Ok(controller)
    }

    /// Rescan the whole workspace, cancelling any full scan in flight.
    ///
    /// # Errors
    /// Returns an error if a scope glob is invalid or the workspace root
    /// cannot be enumerated.
    pub async fn full_rescan(&self) -> Result<ScanOutcome> {
        if self.inner.shutdown.is_cancelled() {
            return Ok(ScanOutcome::Cancelled);
        }
        let token = self.inner.shutdown.child_token();
        self.inner.full_scan.claim(token.clone());
        let config = Arc::clone(&self.snapshot().config);
        scan_workspace(&self.inner.state, self.inner.workspace.as_ref(), &config, &token).await
    }

    /// A document was opened in the editor: scan it right away.
    pub async fn on_opened(&self, document: &DocumentId) {
        self.rescan_document(document, None).await;
    }

    /// The text of an open document changed. Zero-delta notifications are
    /// ignored; otherwise a rescan is debounced per document.
    pub fn on_changed(&self, document: &DocumentId, content_changes: usize) {
        if content_changes == 0 || self.inner.shutdown.is_cancelled() {
            return;
        }
        let this = self.clone();
        let key = document.clone();
        self.inner
            .changes
            .schedule(document.clone(), &self.inner.shutdown, move |token| async move {
                this.rescan_document(&key, Some(&token)).await;
            });
    }

    /// A document was saved through the editor: drop any pending debounce
    /// and scan immediately. The watcher's echo of the write is suppressed.
    pub async fn on_saved(&self, document: &DocumentId) {
        self.inner.changes.cancel(document);
        self.inner.recently_saved.mark(document);
        self.rescan_document(document, None).await;
    }

    /// A document was closed. Diagnostics of untracked documents are
    /// cleared; tracked files keep theirs since they describe the disk copy.
    pub fn on_closed(&self, document: &DocumentId) {
        self.inner.changes.cancel(document);
        let mut state = self.lock_state();
        let tracked = document
            .as_path()
            .is_some_and(|path| state.tracked.contains(path));
        if !tracked {
            state.remove_document(document);
        }
    }

    /// Apply one file system event. Failures stay local to the file.
    pub async fn on_file_event(&self, event: FileEvent) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        match event.kind {
            FileEventKind::Created => self.file_created(event.path).await,
            FileEventKind::Changed => self.file_changed(event.path).await,
            FileEventKind::Deleted => self.file_deleted(&event.path),
        }
    }

    /// Swap in a new configuration and debounce a full rescan.
    ///
    /// The matcher is rebuilt lazily on next use.
    pub fn on_config_changed(&self, config: ScanConfig) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        *self
            .inner
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(ConfigSnapshot::new(config));

        let this = self.clone();
        let token = self.inner.shutdown.child_token();
        let task = delayed(token.clone(), self.inner.options.config_delay, async move {
            match this.full_rescan().await {
                Ok(outcome) => tracing::debug!(?outcome, "rescan after configuration change"),
                Err(err) => tracing::warn!(error = %err, "rescan after configuration change failed"),
            }
        });
        self.inner.config_rescan.spawn(token, task);
    }

    /// Cancel every pending timer and the scan in flight. No scheduled work
    /// runs afterwards.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
        self.inner.changes.cancel_all();
        self.inner.config_rescan.cancel();
        self.inner.full_scan.cancel();
        self.inner.recently_saved.clear();
        tracing::debug!("update controller shut down");
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    #[must_use]
    pub fn config(&self) -> Arc<ScanConfig> {
        Arc::clone(&self.snapshot().config)
    }

    #[must_use]
    pub fn workspace(&self) -> &Arc<dyn Workspace> {
        &self.inner.workspace
    }

    #[must_use]
    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    #[must_use]
    pub fn diagnostics(&self, document: &DocumentId) -> Vec<Diagnostic> {
        self.lock_state().store.get(document).to_vec()
    }

    /// Every stored diagnostic, ordered by document then line.
    #[must_use]
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        self.lock_state().store.all()
    }

    #[must_use]
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        self.lock_state()
            .tracked
            .iter()
            .map(Path::to_path_buf)
            .collect()
    }

    #[must_use]
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.lock_state().tracked.contains(path)
    }

    /// Number of documents with a debounced rescan pending.
    #[must_use]
    pub fn pending_rescans(&self) -> usize {
        self.inner.changes.pending()
    }

    fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(
            &self
                .inner
                .snapshot
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the state unless `token` was cancelled while the caller awaited.
    fn lock_if_live(&self, token: Option<&CancellationToken>) -> Option<MutexGuard<'_, ScanState>> {
        let state = self.lock_state();
        if token.is_some_and(CancellationToken::is_cancelled) || self.inner.shutdown.is_cancelled() {
            return None;
        }
        Some(state)
    }

    async fn rescan_document(&self, document: &DocumentId, token: Option<&CancellationToken>) {
        let snapshot = self.snapshot();
        if !snapshot.config.enabled {
            return;
        }
        let root = self.inner.workspace.root();
        let disabled = snapshot
            .filter()
            .is_some_and(|filter| filter.is_disabled(root, document));
        let scan = if disabled {
            DocumentScan::Scanned(Vec::new())
        } else {
            scan_document(self.inner.workspace.as_ref(), &snapshot.matcher(), document).await
        };

        let Some(mut state) = self.lock_if_live(token) else {
            return;
        };
        match scan {
            DocumentScan::Scanned(diagnostics) => state.set_document(document.clone(), diagnostics),
            DocumentScan::Binary => state.remove_document(document),
            DocumentScan::Unreadable => {
                tracing::debug!(%document, "rescan skipped, keeping previous diagnostics");
            }
        }
    }

    async fn file_created(&self, path: PathBuf) {
        let snapshot = self.snapshot();
        if !snapshot.config.enabled {
            return;
        }
        let root = self.inner.workspace.root();
        let document = DocumentId::File(path);
        let Some(filter) = snapshot.filter() else {
            return;
        };
        if !filter.is_document_in_scope(root, &document) {
            return;
        }
        let Some(path) = document.as_path() else {
            return;
        };
        if has_binary_extension(path) {
            return;
        }
        // Editors that save by renaming a temp file report a create.
        if self.inner.recently_saved.contains(&document) && self.lock_state().tracked.contains(path) {
            tracing::debug!(%document, "create event follows a save, ignored");
            return;
        }
        let scan = scan_document(self.inner.workspace.as_ref(), &snapshot.matcher(), &document).await;
        let DocumentScan::Scanned(diagnostics) = scan else {
            tracing::debug!(%document, "created file skipped");
            return;
        };

        let Some(mut state) = self.lock_if_live(None) else {
            return;
        };
        state.tracked.insert(path.to_path_buf());
        if filter.is_disabled(root, &document) {
            return;
        }
        state.set_document(document, diagnostics);
    }

    async fn file_changed(&self, path: PathBuf) {
        let document = DocumentId::File(path);
        if self.inner.recently_saved.contains(&document) {
            tracing::debug!(%document, "change event follows a save, ignored");
            return;
        }
        if !document
            .as_path()
            .is_some_and(|path| self.lock_state().tracked.contains(path))
        {
            return;
        }
        self.rescan_document(&document, None).await;
    }

    fn file_deleted(&self, path: &Path) {
        let document = DocumentId::file(path);
        self.inner.changes.cancel(&document);
        let mut state = self.lock_state();
        let removed = state.tracked.remove_under(path);
        for file in &removed {
            let removed_document = DocumentId::file(file.clone());
            self.inner.changes.cancel(&removed_document);
            state.remove_document(&removed_document);
        }
        state.remove_document(&document);
        tracing::debug!(path = %path.display(), removed = removed.len(), "deleted from scope");
    }
}

impl std::fmt::Debug for UpdateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateController")
            .field("root", &self.inner.workspace.root())
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
