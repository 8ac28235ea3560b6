use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::cli::{Cli, ScanArgs};
use crate::config::{Config, ScanConfig, validate_config_semantics};
use crate::diagnostic::{Diagnostic, DiagnosticStore, NullSink};
use crate::document::DocumentId;
use crate::marker::CompiledMatcher;
use crate::output::{
    ColorMode, DiagnosticFormatter, DiagnosticReport, JsonFormatter, OutputFormat,
    SarifFormatter, TextFormatter, print_error,
};
use crate::workspace::{DocumentScan, LocalWorkspace, ScanOutcome, ScanState, Workspace, scan_document, scan_workspace};
use crate::{EXIT_CONFIG_ERROR, EXIT_MARKERS_FOUND, EXIT_SUCCESS, Result, TodoGuardError};

use super::{color_choice_to_mode, load_config, write_output};

pub async fn run_scan(args: &ScanArgs, cli: &Cli) -> i32 {
    match run_scan_impl(args, cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_error(color_choice_to_mode(cli.color), &e);
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan every path once and render the report.
///
/// # Errors
/// Returns an error if the configuration is invalid, a path does not exist,
/// or the output cannot be written.
pub async fn run_scan_impl(args: &ScanArgs, cli: &Cli) -> Result<i32> {
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_overrides(&mut config, args);
    validate_config_semantics(&config)?;

    let report = scan_paths(&args.paths, &config.to_scan_config()).await?;
    tracing::info!(
        files = report.files_scanned,
        markers = report.diagnostics.len(),
        "scan complete"
    );

    let output = format_report(&report, args.format, color_choice_to_mode(cli.color))?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    let failed = args
        .fail_on
        .is_some_and(|threshold| report.has_at_least(threshold));
    Ok(if failed { EXIT_MARKERS_FOUND } else { EXIT_SUCCESS })
}

/// Fold command line flags into the loaded configuration. Globs are added to
/// the configured ones, never replacing them.
pub fn apply_overrides(config: &mut Config, args: &ScanArgs) {
    config.scope.include.extend(args.include.iter().cloned());
    config.scope.exclude.extend(args.exclude.iter().cloned());
    if args.case_insensitive {
        config.scan.case_sensitive = false;
    }
}

/// Scan directories through a workspace scan and single files directly.
///
/// Files named explicitly are scanned even when the scope globs would skip
/// them. Diagnostics are ordered by document, then position.
///
/// # Errors
/// Returns an error if a path does not exist or a directory cannot be walked.
pub async fn scan_paths(paths: &[PathBuf], config: &ScanConfig) -> Result<DiagnosticReport> {
    let matcher = CompiledMatcher::compile_or_disabled(config);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut files_scanned = 0;
    let mut roots: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_dir() {
            let workspace = LocalWorkspace::new(path)?;
            let state = Mutex::new(ScanState::new(DiagnosticStore::new(Arc::new(NullSink))));
            let outcome = scan_workspace(&state, &workspace, config, &CancellationToken::new()).await?;
            if let ScanOutcome::Completed(summary) = outcome {
                files_scanned += summary.scanned;
            }
            let state = state.into_inner().unwrap_or_else(PoisonError::into_inner);
            diagnostics.extend(state.store.all());
            roots.push(workspace.root().to_path_buf());
        } else if config.enabled {
            let file = resolve_file(path)?;
            let workspace = LocalWorkspace::new(file.parent().unwrap_or(file.as_path()))?;
            match scan_document(&workspace, &matcher, &DocumentId::file(file.clone())).await {
                DocumentScan::Scanned(found) => {
                    files_scanned += 1;
                    diagnostics.extend(found);
                }
                DocumentScan::Binary | DocumentScan::Unreadable => {
                    tracing::debug!(path = %file.display(), "skipping binary or unreadable file");
                }
            }
        }
    }

    diagnostics.sort_by(|a, b| {
        (&a.document, a.line, a.start_column).cmp(&(&b.document, b.line, b.start_column))
    });
    diagnostics.dedup();

    let root = match roots.as_slice() {
        [single] => Some(single.clone()),
        _ => std::env::current_dir()
            .ok()
            .and_then(|dir| dunce::canonicalize(dir).ok()),
    };
    Ok(DiagnosticReport::new(root, files_scanned, diagnostics))
}

fn resolve_file(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|source| TodoGuardError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `report` in the requested format.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn format_report(report: &DiagnosticReport, format: OutputFormat, color_mode: ColorMode) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Sarif => SarifFormatter.format(report),
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
