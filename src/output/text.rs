use std::fmt::Write;

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::Result;

use super::{DiagnosticFormatter, DiagnosticReport};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// `path:line:col: severity: message [source]`, one diagnostic per line,
/// with 1-based positions.
pub struct TextFormatter {
    use_colors: bool,
    show_summary: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            show_summary: true,
        }
    }

    #[must_use]
    pub const fn with_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    const fn color_for(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => ansi::RED,
            Severity::Warning => ansi::YELLOW,
            Severity::Info => ansi::BLUE,
            Severity::Hint => ansi::CYAN,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    /// Render a single diagnostic without a trailing newline.
    #[must_use]
    pub fn format_diagnostic(&self, report: &DiagnosticReport, diagnostic: &Diagnostic) -> String {
        let severity = self.colorize(diagnostic.severity.as_str(), Self::color_for(diagnostic.severity));
        format!(
            "{}:{}:{}: {severity}: {} [{}]",
            report.display_path(&diagnostic.document),
            diagnostic.line + 1,
            diagnostic.start_column + 1,
            diagnostic.message,
            diagnostic.source
        )
    }

    fn format_summary(&self, report: &DiagnosticReport) -> String {
        let mut summary = format!(
            "Summary: {} files scanned, {} markers",
            report.files_scanned,
            report.diagnostics.len()
        );
        for severity in Severity::ALL {
            let count = report.count(severity);
            if count > 0 {
                let text = format!("{count} {severity}");
                let _ = write!(summary, ", {}", self.colorize(&text, Self::color_for(severity)));
            }
        }
        summary
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl DiagnosticFormatter for TextFormatter {
    fn format(&self, report: &DiagnosticReport) -> Result<String> {
        let mut output = String::new();
        for diagnostic in &report.diagnostics {
            let _ = writeln!(output, "{}", self.format_diagnostic(report, diagnostic));
        }
        if self.show_summary {
            if !report.diagnostics.is_empty() {
                output.push('\n');
            }
            let _ = writeln!(output, "{}", self.format_summary(report));
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
