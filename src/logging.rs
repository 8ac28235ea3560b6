//! Diagnostic logging to stderr.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive that overrides the
/// verbosity flags.
pub const LOG_ENV: &str = "TODO_GUARD_LOG";

/// Filter used when [`LOG_ENV`] is not set.
#[must_use]
pub const fn default_filter(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "todo_guard=error";
    }
    match verbose {
        0 => "todo_guard=warn",
        1 => "todo_guard=info",
        _ => "todo_guard=debug",
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
