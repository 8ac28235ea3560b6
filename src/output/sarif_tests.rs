use std::path::PathBuf;

use super::*;
use crate::output::tests::diagnostic;

fn parse(report: &DiagnosticReport) -> serde_json::Value {
    let output = SarifFormatter.format(report).unwrap();
    serde_json::from_str(&output).unwrap()
}

fn sample() -> DiagnosticReport {
    DiagnosticReport::new(
        Some(PathBuf::from("/w")),
        1,
        vec![
            diagnostic("/w/src/a.rs", 0, Severity::Error, "FIXME: urgent issue"),
            diagnostic("/w/src/a.rs", 5, Severity::Info, "NOTE: fyi"),
        ],
    )
}

#[test]
fn sarif_has_schema_and_version() {
    let parsed = parse(&sample());

    assert_eq!(
        parsed["$schema"],
        "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json"
    );
    assert_eq!(parsed["version"], "2.1.0");
}

#[test]
fn sarif_declares_one_rule_per_severity() {
    let parsed = parse(&sample());
    let driver = &parsed["runs"][0]["tool"]["driver"];

    assert_eq!(driver["name"], "todo-guard");
    let rules = driver["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[0]["id"], "todo-guard/error");
    assert_eq!(rules[3]["id"], "todo-guard/hint");
}

#[test]
fn sarif_results_map_severity_and_region() {
    let parsed = parse(&sample());
    let results = parsed["runs"][0]["results"].as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["ruleId"], "todo-guard/error");
    assert_eq!(results[0]["ruleIndex"], 0);
    assert_eq!(results[0]["level"], "error");
    assert_eq!(results[0]["message"]["text"], "FIXME: urgent issue");

    let location = &results[0]["locations"][0]["physicalLocation"];
    assert_eq!(location["artifactLocation"]["uri"], "src/a.rs");
    assert_eq!(location["region"]["startLine"], 1);
    assert_eq!(location["region"]["startColumn"], 4);

    assert_eq!(results[1]["ruleId"], "todo-guard/info");
    assert_eq!(results[1]["level"], "note");
}

#[test]
fn sarif_with_no_diagnostics_has_empty_results() {
    let parsed = parse(&DiagnosticReport::default());
    assert!(parsed["runs"][0]["results"].as_array().unwrap().is_empty());
}
