use std::io::{Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, WatchArgs};
use crate::config::{FileConfigLoader, validate_config_semantics};
use crate::controller::{ControllerOptions, UpdateController, WatchEvent, watch_paths};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::document::DocumentId;
use crate::output::{ColorMode, DiagnosticReport, TextFormatter, print_error};
use crate::workspace::{LocalWorkspace, Workspace};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result};

use super::{color_choice_to_mode, load_config};

/// Sink that prints every publish as text lines.
///
/// A publish with no diagnostics prints `path: clean`; clearing one document
/// prints `path: cleared`. Clearing everything prints nothing, since a full
/// rescan follows it immediately.
pub struct ConsoleSink<W: Write + Send = Stdout> {
    context: DiagnosticReport,
    formatter: TextFormatter,
    writer: Mutex<W>,
}

impl ConsoleSink<Stdout> {
    #[must_use]
    pub fn stdout(root: PathBuf, mode: ColorMode) -> Self {
        Self::new(root, mode, std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    #[must_use]
    pub fn new(root: PathBuf, mode: ColorMode, writer: W) -> Self {
        Self {
            context: DiagnosticReport::new(Some(root), 0, Vec::new()),
            formatter: TextFormatter::new(mode).with_summary(false),
            writer: Mutex::new(writer),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            // A closed stdout leaves nothing to report to.
            let _ = writeln!(writer, "{line}");
        }
        let _ = writer.flush();
    }
}

impl<W: Write + Send> ConsoleSink<W>
where
    W: AsRef<[u8]>,
{
    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> String {
        let writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(writer.as_ref()).into_owned()
    }
}

impl<W: Write + Send> DiagnosticSink for ConsoleSink<W> {
    fn publish(&self, document: &DocumentId, diagnostics: &[Diagnostic]) {
        let lines: Vec<String> = if diagnostics.is_empty() {
            vec![format!("{}: clean", self.context.display_path(document))]
        } else {
            diagnostics
                .iter()
                .map(|d| self.formatter.format_diagnostic(&self.context, d))
                .collect()
        };
        self.write_lines(&lines);
    }

    fn clear(&self, document: &DocumentId) {
        self.write_lines(&[format!("{}: cleared", self.context.display_path(document))]);
    }

    fn clear_all(&self) {}
}

pub async fn run_watch(args: &WatchArgs, cli: &Cli) -> i32 {
    match run_watch_impl(args, cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(color_choice_to_mode(cli.color), &e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan `args.path`, then keep printing updates until Ctrl+C.
///
/// # Errors
/// Returns an error if the configuration is invalid, the root cannot be
/// scanned, or the file watcher cannot be started.
pub async fn run_watch_impl(args: &WatchArgs, cli: &Cli) -> Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?;
    validate_config_semantics(&config)?;

    let workspace = LocalWorkspace::new(&args.path)?;
    let root = workspace.root().to_path_buf();
    let config_path = resolve_config_path(args.config.as_deref(), cli.no_config);
    let mode = color_choice_to_mode(cli.color);
    let sink = Arc::new(ConsoleSink::stdout(root.clone(), mode));

    let controller = UpdateController::start(
        Arc::new(workspace),
        sink,
        config.to_scan_config(),
        ControllerOptions::default(),
    )
    .await?;
    if !cli.quiet {
        eprintln!("Watching {} (press Ctrl+C to stop)", root.display());
    }

    let shutdown = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = {
        let root = root.clone();
        let config_path = config_path.clone();
        let shutdown = shutdown.clone();
        std::thread::spawn(move || watch_paths(&root, config_path.as_deref(), &tx, &shutdown))
    };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            event = rx.recv() => match event {
                Some(WatchEvent::File(event)) => controller.on_file_event(event).await,
                Some(WatchEvent::ConfigChanged) => {
                    reload_config(&controller, config_path.as_deref(), mode);
                }
                None => break,
            },
        }
    }

    tracing::debug!("stopping watch");
    shutdown.cancel();
    controller.shutdown();
    match watcher.join() {
        Ok(result) => result?,
        Err(_) => tracing::warn!("file watcher thread panicked"),
    }
    Ok(EXIT_SUCCESS)
}

/// The config file to watch: the explicit one, or whatever the default
/// search would load.
fn resolve_config_path(explicit: Option<&Path>, no_config: bool) -> Option<PathBuf> {
    let path = match (explicit, no_config) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, true) => None,
        (None, false) => FileConfigLoader::new().find_config_path(),
    }?;
    dunce::canonicalize(&path).ok().or(Some(path))
}

/// Reload after the config file changed. A file that no longer loads keeps
/// the previous configuration active.
fn reload_config(controller: &UpdateController, config_path: Option<&Path>, mode: ColorMode) {
    match load_config(config_path, config_path.is_none()) {
        Ok(config) => {
            tracing::info!("configuration changed, rescanning");
            controller.on_config_changed(config.to_scan_config());
        }
        Err(e) => print_error(mode, &e),
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
