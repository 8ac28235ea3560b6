use super::*;
use crate::config::ScanConfig;
use crate::marker::KeywordRule;

fn default_matcher() -> CompiledMatcher {
    CompiledMatcher::compile(&ScanConfig::default()).unwrap()
}

fn doc() -> DocumentId {
    DocumentId::file("/work/src/lib.rs")
}

#[test]
fn fixme_line_produces_error_diagnostic() {
    let diagnostics = scan_text(&default_matcher(), &doc(), "// FIXME: urgent issue");

    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.line, 0);
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.message, "FIXME: urgent issue");
    assert_eq!(d.start_column, 3);
    assert_eq!(d.end_column, "// FIXME: urgent issue".len());
    assert_eq!(d.source, "todo-guard");
}

#[test]
fn keyword_without_trailing_text_uses_keyword_alone() {
    let diagnostics = scan_text(&default_matcher(), &doc(), "x = 1 # TODO");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "TODO");
}

#[test]
fn trailing_whitespace_excluded_from_range_and_message() {
    let line = "  // TODO:   tidy up    ";
    let diagnostics = scan_text(&default_matcher(), &doc(), line);

    let d = &diagnostics[0];
    assert_eq!(d.message, "TODO: tidy up");
    assert_eq!(d.start_column, 5);
    assert_eq!(d.end_column, line.trim_end().len());
}

#[test]
fn two_keywords_on_one_line_yield_one_diagnostic() {
    let diagnostics = scan_text(&default_matcher(), &doc(), "// TODO: first FIXME: second");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "TODO: first FIXME: second");
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn lines_are_zero_based_and_crlf_aware() {
    let text = "fn main() {}\r\n// TODO: a\r\n\r\n// NOTE: b\r\n";
    let diagnostics = scan_text(&default_matcher(), &doc(), text);

    let lines: Vec<usize> = diagnostics.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert_eq!(diagnostics[0].message, "TODO: a");
    assert_eq!(diagnostics[1].severity, Severity::Info);
}

#[test]
fn columns_count_characters_not_bytes() {
    let diagnostics = scan_text(&default_matcher(), &doc(), "// ünïcode TODO: ok");

    assert_eq!(diagnostics[0].start_column, 11);
    assert_eq!(diagnostics[0].end_column, 11 + "TODO: ok".len());
}

#[test]
fn case_insensitive_normalizes_message() {
    let config = ScanConfig {
        case_sensitive: false,
        ..ScanConfig::default()
    };
    let matcher = CompiledMatcher::compile(&config).unwrap();

    let diagnostics = scan_text(&matcher, &doc(), "// todo: x");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "TODO: x");
}

#[test]
fn case_sensitive_ignores_lowercase() {
    let config = ScanConfig {
        case_sensitive: true,
        ..ScanConfig::default()
    };
    let matcher = CompiledMatcher::compile(&config).unwrap();

    assert!(scan_text(&matcher, &doc(), "// todo: x").is_empty());
}

#[test]
fn empty_rules_produce_nothing() {
    let config = ScanConfig {
        rules: Vec::new(),
        ..ScanConfig::default()
    };
    let matcher = CompiledMatcher::compile(&config).unwrap();

    let text = "// TODO: a\n// FIXME: b\n";
    assert!(scan_text(&matcher, &doc(), text).is_empty());
}

#[test]
fn keyword_inside_identifier_is_not_a_marker() {
    assert!(scan_text(&default_matcher(), &doc(), "let TODOS = 1;").is_empty());
}

#[test]
fn buffer_and_text_scans_agree() {
    let text = "a\n// TODO: one\nb // FIXME broken\n  # HACK\n";
    let matcher = default_matcher();
    let buffer = OpenBuffer::from_text(doc(), text);

    let from_text = scan_text(&matcher, &doc(), text);
    let from_buffer = scan_lines(&matcher, &doc(), &buffer);

    assert_eq!(from_text, from_buffer);
    assert_eq!(from_text.len(), 3);
}

#[test]
fn scanning_twice_is_identical() {
    let text = "// TODO: one\n// BUG: two";
    let matcher = default_matcher();

    assert_eq!(
        scan_text(&matcher, &doc(), text),
        scan_text(&matcher, &doc(), text)
    );
}

#[test]
fn string_slice_is_a_line_source() {
    let lines = vec!["// XXX: slice".to_string()];
    let diagnostics = scan_lines(&default_matcher(), &doc(), lines.as_slice());

    assert_eq!(diagnostics[0].message, "XXX: slice");
}

#[test]
fn custom_keyword_uses_configured_severity() {
    let config = ScanConfig {
        rules: vec![KeywordRule::new("REVIEW", Severity::Hint)],
        ..ScanConfig::default()
    };
    let matcher = CompiledMatcher::compile(&config).unwrap();

    let diagnostics = scan_text(&matcher, &doc(), "/* REVIEW: naming */");
    assert_eq!(diagnostics[0].severity, Severity::Hint);
    assert_eq!(diagnostics[0].message, "REVIEW: naming */");
}

#[test]
fn split_lines_handles_mixed_terminators() {
    let lines: Vec<&str> = split_lines("a\r\nb\nc").collect();
    assert_eq!(lines, vec!["a", "b", "c"]);
}
