use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid marker pattern template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl TodoGuardError {
    /// Short category name used in log fields and error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::InvalidTemplate { .. } | Self::Regex(_) => "Config",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::InvalidPattern { .. } => "Pattern",
            Self::TomlParse(_) | Self::TomlSerialize(_) | Self::JsonSerialize(_) => "Serialization",
            Self::Watch(_) => "Watch",
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
