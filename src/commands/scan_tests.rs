use std::fs;

use tempfile::TempDir;

use super::*;
use crate::cli::{ColorChoice, Commands};
use crate::diagnostic::Severity;

fn scan_args(paths: Vec<PathBuf>) -> ScanArgs {
    ScanArgs {
        paths,
        config: None,
        format: OutputFormat::Text,
        output: None,
        fail_on: None,
        include: vec![],
        exclude: vec![],
        case_insensitive: false,
    }
}

fn quiet_cli() -> Cli {
    Cli {
        verbose: 0,
        quiet: true,
        color: ColorChoice::Never,
        no_config: true,
        command: Commands::Scan(scan_args(vec![])),
    }
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::create_dir_all(temp_dir.path().join("node_modules/lib")).unwrap();
    fs::write(temp_dir.path().join("src/a.ts"), "let x;\n// FIXME: urgent issue\n").unwrap();
    fs::write(temp_dir.path().join("src/b.ts"), "// TODO later\n").unwrap();
    fs::write(temp_dir.path().join("node_modules/lib/c.ts"), "// FIXME vendored\n").unwrap();
    temp_dir
}

#[tokio::test]
async fn scan_paths_reports_markers_and_skips_excluded_dirs() {
    let temp_dir = project();

    let report = scan_paths(&[temp_dir.path().to_path_buf()], &Config::default().to_scan_config())
        .await
        .unwrap();

    assert_eq!(report.files_scanned, 2);
    assert_eq!(report.diagnostics.len(), 2);
    let fixme = &report.diagnostics[0];
    assert_eq!(report.display_path(&fixme.document), "src/a.ts");
    assert_eq!(fixme.line, 1);
    assert_eq!(fixme.start_column, 3);
    assert_eq!(fixme.severity, Severity::Error);
    assert_eq!(fixme.message, "FIXME: urgent issue");
    assert_eq!(report.diagnostics[1].severity, Severity::Warning);
}

#[tokio::test]
async fn scan_paths_scans_explicit_file() {
    let temp_dir = project();
    let file = temp_dir.path().join("node_modules/lib/c.ts");

    let report = scan_paths(&[file], &Config::default().to_scan_config()).await.unwrap();

    assert_eq!(report.files_scanned, 1);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].message, "FIXME: vendored");
}

#[tokio::test]
async fn scan_paths_missing_path_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.rs");

    let result = scan_paths(&[missing], &Config::default().to_scan_config()).await;

    assert!(matches!(result, Err(TodoGuardError::FileRead { .. })));
}

#[tokio::test]
async fn scan_paths_deduplicates_overlapping_roots() {
    let temp_dir = project();
    let paths = vec![temp_dir.path().to_path_buf(), temp_dir.path().join("src/a.ts")];

    let report = scan_paths(&paths, &Config::default().to_scan_config()).await.unwrap();

    assert_eq!(report.diagnostics.len(), 2);
}

#[tokio::test]
async fn scan_paths_disabled_config_reports_nothing() {
    let temp_dir = project();
    let mut config = Config::default();
    config.scan.enabled = false;

    let report = scan_paths(
        &[temp_dir.path().to_path_buf(), temp_dir.path().join("src/a.ts")],
        &config.to_scan_config(),
    )
    .await
    .unwrap();

    assert!(report.diagnostics.is_empty());
}

#[test]
fn apply_overrides_extends_globs_and_case() {
    let mut config = Config::default();
    let mut args = scan_args(vec![]);
    args.include = vec!["src/**".to_string()];
    args.exclude = vec!["**/gen/**".to_string()];
    args.case_insensitive = true;

    apply_overrides(&mut config, &args);

    assert_eq!(config.scope.include, vec!["src/**".to_string()]);
    assert!(config.scope.exclude.contains(&"**/node_modules/**".to_string()));
    assert!(config.scope.exclude.contains(&"**/gen/**".to_string()));
    assert!(!config.scan.case_sensitive);
}

#[tokio::test]
async fn run_scan_fail_on_sets_exit_code() {
    let temp_dir = project();
    let mut args = scan_args(vec![temp_dir.path().to_path_buf()]);

    args.fail_on = Some(Severity::Error);
    assert_eq!(run_scan_impl(&args, &quiet_cli()).await.unwrap(), EXIT_MARKERS_FOUND);

    args.fail_on = None;
    assert_eq!(run_scan_impl(&args, &quiet_cli()).await.unwrap(), EXIT_SUCCESS);
}

#[tokio::test]
async fn run_scan_fail_on_below_threshold_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("notes.md"), "NOTE: fyi\n").unwrap();
    let mut args = scan_args(vec![temp_dir.path().to_path_buf()]);
    args.fail_on = Some(Severity::Warning);

    assert_eq!(run_scan_impl(&args, &quiet_cli()).await.unwrap(), EXIT_SUCCESS);
}

#[tokio::test]
async fn run_scan_writes_json_to_output_file() {
    let temp_dir = project();
    let out = temp_dir.path().join("reports/todo.json");
    let mut args = scan_args(vec![temp_dir.path().join("src")]);
    args.format = OutputFormat::Json;
    args.output = Some(out.clone());

    run_scan_impl(&args, &quiet_cli()).await.unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(parsed["summary"]["diagnostics"], 2);
    assert_eq!(parsed["diagnostics"][0]["path"], "a.ts");
}

#[tokio::test]
async fn run_scan_invalid_config_is_an_error() {
    let temp_dir = project();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[scan]\npattern = '({keywords})'\n").unwrap();
    let mut args = scan_args(vec![temp_dir.path().to_path_buf()]);
    args.config = Some(config_path);

    assert_eq!(run_scan(&args, &quiet_cli()).await, EXIT_CONFIG_ERROR);
}

#[test]
fn format_report_text_uses_one_based_positions() {
    let document = DocumentId::file("/w/src/a.ts");
    let report = DiagnosticReport::new(
        Some(PathBuf::from("/w")),
        1,
        vec![Diagnostic {
            document,
            line: 1,
            start_column: 3,
            end_column: 22,
            message: "FIXME: urgent issue".to_string(),
            severity: Severity::Error,
            source: "todo-guard".to_string(),
        }],
    );

    let text = format_report(&report, OutputFormat::Text, ColorMode::Never).unwrap();

    assert!(text.contains("src/a.ts:2:4: error: FIXME: urgent issue [todo-guard]"));
}
