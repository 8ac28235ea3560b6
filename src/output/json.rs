use serde::Serialize;

use crate::diagnostic::Severity;
use crate::error::Result;

use super::{DiagnosticFormatter, DiagnosticReport};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

#[derive(Serialize)]
struct Summary {
    files: usize,
    diagnostics: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    hints: usize,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    path: String,
    line: usize,
    start_column: usize,
    end_column: usize,
    severity: Severity,
    message: &'a str,
    source: &'a str,
}

impl DiagnosticFormatter for JsonFormatter {
    fn format(&self, report: &DiagnosticReport) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                files: report.files_scanned,
                diagnostics: report.diagnostics.len(),
                errors: report.count(Severity::Error),
                warnings: report.count(Severity::Warning),
                infos: report.count(Severity::Info),
                hints: report.count(Severity::Hint),
            },
            diagnostics: report
                .diagnostics
                .iter()
                .map(|d| JsonDiagnostic {
                    path: report.display_path(&d.document),
                    line: d.line,
                    start_column: d.start_column,
                    end_column: d.end_column,
                    severity: d.severity,
                    message: &d.message,
                    source: &d.source,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
