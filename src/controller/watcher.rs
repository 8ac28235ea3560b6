//! Bridge from `notify` to controller events.

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::FileEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    File(FileEvent),
    ConfigChanged,
}

/// Map one `notify` event onto controller events.
///
/// Renames become a delete of the old path and a create of the new one.
/// Any event touching `config_path` is reported as a configuration change.
#[must_use]
pub fn translate_event(event: &Event, config_path: Option<&Path>) -> Vec<WatchEvent> {
    if let Some(config_path) = config_path
        && event.paths.iter().any(|path| path == config_path)
    {
        return match event.kind {
            EventKind::Access(_) => Vec::new(),
            _ => vec![WatchEvent::ConfigChanged],
        };
    }

    let created = |path: &PathBuf| WatchEvent::File(FileEvent::created(path.clone()));
    let deleted = |path: &PathBuf| WatchEvent::File(FileEvent::deleted(path.clone()));
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event
            .paths
            .iter()
            .map(created)
            .collect(),
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From)) => event
            .paths
            .iter()
            .map(deleted)
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.as_slice() {
            [from, to] => vec![deleted(from), created(to)],
            _ => Vec::new(),
        },
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .map(|path| {
                if path.exists() {
                    created(path)
                } else {
                    deleted(path)
                }
            })
            .collect(),
        EventKind::Modify(_) => event
            .paths
            .iter()
            .map(|path| WatchEvent::File(FileEvent::changed(path.clone())))
            .collect(),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => Vec::new(),
    }
}

/// Watch `root` recursively, plus `config_path` when it lives outside the
/// root, forwarding translated events until `shutdown` fires.
///
/// Blocks the calling thread; run it on a dedicated thread.
///
/// # Errors
/// Returns an error if the watcher cannot be created or a path cannot be watched.
pub fn watch_paths(
    root: &Path,
    config_path: Option<&Path>,
    tx: &mpsc::UnboundedSender<WatchEvent>,
    shutdown: &CancellationToken,
) -> notify::Result<()> {
    let (watch_tx, watch_rx) = std_mpsc::channel();
    let mut watcher = RecommendedWatcher::new(watch_tx, NotifyConfig::default())?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    if let Some(config_path) = config_path
        && !config_path.starts_with(root)
    {
        watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    }

    while !shutdown.is_cancelled() {
        match watch_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => {
                for message in translate_event(&event, config_path) {
                    if tx.send(message).is_err() {
                        return Ok(());
                    }
                }
            }
            Ok(Err(err)) => tracing::warn!(error = %err, "file watcher error"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
