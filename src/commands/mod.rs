pub mod config;
pub mod init;
pub mod scan;
pub mod watch;

pub use config::{run_config, run_config_show_impl, run_config_validate_impl};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use scan::{run_scan, run_scan_impl};
pub use watch::{ConsoleSink, run_watch};

use std::path::Path;

use crate::cli::ColorChoice;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::Result;
use crate::output::ColorMode;

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Load the configuration for a command: an explicit path wins, `--no-config`
/// yields the defaults, otherwise the usual search order applies.
///
/// # Errors
/// Returns an error if the selected file cannot be read or parsed.
pub fn load_config(config_path: Option<&Path>, no_config: bool) -> Result<Config> {
    let loader = FileConfigLoader::new();
    match (config_path, no_config) {
        (Some(path), _) => loader.load_from_path(path),
        (None, true) => Ok(Config::default()),
        (None, false) => loader.load(),
    }
}

/// Write to `output_path`, or stdout unless `quiet`.
///
/// # Errors
/// Returns an error if the output file or its parent directory cannot be written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}
