use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::Result;

use super::{DiagnosticFormatter, DiagnosticReport};

/// SARIF 2.1.0 output formatter for GitHub Code Scanning and other CI/CD tools.
#[derive(Debug, Default, Clone, Copy)]
pub struct SarifFormatter;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "todo-guard";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    name: &'static str,
    short_description: MultiformatMessageString,
    default_configuration: ReportingConfiguration,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString {
    text: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: &'static str,
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
    uri_base_id: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: usize,
    start_column: usize,
    end_column: usize,
}

/// Rule id, display name and SARIF level for each severity, in rule index order.
static RULES: [(Severity, &str, &str, &str, &str); 4] = [
    (Severity::Error, "todo-guard/error", "ErrorMarker", "error", "Marker comment reported as an error"),
    (Severity::Warning, "todo-guard/warning", "WarningMarker", "warning", "Marker comment reported as a warning"),
    (Severity::Info, "todo-guard/info", "InfoMarker", "note", "Informational marker comment"),
    (Severity::Hint, "todo-guard/hint", "HintMarker", "note", "Marker comment reported as a hint"),
];

impl SarifFormatter {
    fn build_rules() -> Vec<ReportingDescriptor> {
        RULES
            .iter()
            .map(|&(_, id, name, level, text)| ReportingDescriptor {
                id,
                name,
                short_description: MultiformatMessageString { text },
                default_configuration: ReportingConfiguration { level },
            })
            .collect()
    }

    fn convert(report: &DiagnosticReport, diagnostic: &Diagnostic) -> SarifResult {
        let (rule_index, &(_, rule_id, _, level, _)) = RULES
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.0 == diagnostic.severity)
            .unwrap_or((1, &RULES[1]));

        SarifResult {
            rule_id,
            rule_index,
            level,
            message: Message {
                text: diagnostic.message.clone(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: report.display_path(&diagnostic.document),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: diagnostic.line + 1,
                        start_column: diagnostic.start_column + 1,
                        end_column: diagnostic.end_column + 1,
                    },
                },
            }],
        }
    }
}

impl DiagnosticFormatter for SarifFormatter {
    fn format(&self, report: &DiagnosticReport) -> Result<String> {
        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: Self::build_rules(),
                    },
                },
                results: report
                    .diagnostics
                    .iter()
                    .map(|d| Self::convert(report, d))
                    .collect(),
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
