use std::fs;

use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, TodoGuardError};

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(TodoGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# todo-guard configuration file
version = "1"

[scan]
# Turn marker scanning off entirely
enabled = true

# Match keywords with exact casing; when false, "todo" is reported as TODO
case_sensitive = true

# Regex template: {keywords} becomes the escaped keyword alternation.
# It must define exactly two capture groups: the keyword and the trailing text.
pattern = '\b({keywords})\b:?(.*)'

# Label shown as the diagnostic source
source = "todo-guard"

[scope]
# Files to scan (empty = every file under the root)
include = []

# Files to skip; exclude wins over include
exclude = ["**/node_modules/**", "**/target/**", "**/.git/**"]

# Files that stay tracked but never get diagnostics
disabled = []

# Keyword rules. Severity is one of: error, warning, info, hint
[[keywords]]
keyword = "TODO"
severity = "warning"

[[keywords]]
keyword = "FIXME"
severity = "error"

[[keywords]]
keyword = "BUG"
severity = "error"

[[keywords]]
keyword = "HACK"
severity = "warning"

[[keywords]]
keyword = "XXX"
severity = "warning"

[[keywords]]
keyword = "NOTE"
severity = "info"
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
