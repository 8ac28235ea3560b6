use std::path::PathBuf;

use super::*;
use crate::diagnostic::Severity;

fn sink() -> ConsoleSink<Vec<u8>> {
    ConsoleSink::new(PathBuf::from("/w"), ColorMode::Never, Vec::new())
}

fn diagnostic(line: usize, message: &str) -> Diagnostic {
    Diagnostic {
        document: DocumentId::file("/w/src/a.rs"),
        line,
        start_column: 3,
        end_column: 3 + message.len(),
        message: message.to_string(),
        severity: Severity::Warning,
        source: "todo-guard".to_string(),
    }
}

#[test]
fn publish_prints_one_line_per_diagnostic() {
    let sink = sink();

    sink.publish(
        &DocumentId::file("/w/src/a.rs"),
        &[diagnostic(0, "TODO: one"), diagnostic(4, "TODO: two")],
    );

    assert_eq!(
        sink.output(),
        "src/a.rs:1:4: warning: TODO: one [todo-guard]\nsrc/a.rs:5:4: warning: TODO: two [todo-guard]\n"
    );
}

#[test]
fn empty_publish_reports_clean() {
    let sink = sink();
    sink.publish(&DocumentId::file("/w/src/a.rs"), &[]);
    assert_eq!(sink.output(), "src/a.rs: clean\n");
}

#[test]
fn clear_reports_cleared_and_clear_all_is_silent() {
    let sink = sink();

    sink.clear(&DocumentId::file("/w/gone.rs"));
    sink.clear_all();

    assert_eq!(sink.output(), "gone.rs: cleared\n");
}

#[test]
fn no_config_means_nothing_to_watch() {
    assert_eq!(resolve_config_path(None, true), None);
}

#[test]
fn explicit_config_path_is_kept_when_missing() {
    let path = PathBuf::from("does-not-exist/.todo-guard.toml");
    assert_eq!(resolve_config_path(Some(&path), false), Some(path));
}
