//! Error output on stderr.
//!
//! Format: `✖ {type}: {message}` followed by one `× {cause}` line per
//! underlying error.

use std::io::{IsTerminal, Write};

use crate::error::TodoGuardError;

use super::ColorMode;

mod ansi {
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal(),
        };
        Self { use_colors }
    }

    /// Write `error` and its chain of causes.
    pub fn write_error<W: Write>(&self, w: &mut W, error: &TodoGuardError) {
        // Write failures on stderr cannot be reported anywhere.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {}:{} {error}",
                ansi::BOLD,
                ansi::RED,
                error.error_type(),
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {}: {error}", error.error_type());
        }

        let mut cause = std::error::Error::source(error);
        while let Some(source) = cause {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {source}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {source}");
            }
            cause = source.source();
        }
    }
}

/// Print `error` to stderr.
pub fn print_error(mode: ColorMode, error: &TodoGuardError) {
    let mut stderr = std::io::stderr().lock();
    ErrorOutput::new(mode).write_error(&mut stderr, error);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
