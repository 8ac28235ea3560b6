use super::*;

pub(super) fn diagnostic(path: &str, line: usize, severity: Severity, message: &str) -> Diagnostic {
    Diagnostic {
        document: DocumentId::file(path),
        line,
        start_column: 3,
        end_column: 3 + message.chars().count(),
        message: message.to_string(),
        severity,
        source: "todo-guard".to_string(),
    }
}

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
    assert!("markdown".parse::<OutputFormat>().is_err());
}

#[test]
fn report_counts_by_severity() {
    let report = DiagnosticReport::new(
        None,
        2,
        vec![
            diagnostic("/w/a.rs", 0, Severity::Error, "FIXME: a"),
            diagnostic("/w/a.rs", 4, Severity::Warning, "TODO: b"),
            diagnostic("/w/b.rs", 1, Severity::Warning, "TODO: c"),
        ],
    );

    assert_eq!(report.count(Severity::Error), 1);
    assert_eq!(report.count(Severity::Warning), 2);
    assert_eq!(report.count(Severity::Hint), 0);
    assert!(report.has_at_least(Severity::Error));
    assert!(report.has_at_least(Severity::Info));
}

#[test]
fn empty_report_has_nothing_at_any_threshold() {
    let report = DiagnosticReport::default();
    assert!(!report.has_at_least(Severity::Hint));
}

#[test]
fn display_path_is_relative_to_root() {
    let report = DiagnosticReport::new(Some(PathBuf::from("/w")), 0, Vec::new());

    assert_eq!(report.display_path(&DocumentId::file("/w/src/a.rs")), "src/a.rs");
    assert_eq!(report.display_path(&DocumentId::file("/tmp/b.rs")), "/tmp/b.rs");
    assert_eq!(
        report.display_path(&DocumentId::untitled("Untitled-1")),
        "untitled:Untitled-1"
    );
}
