use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while assembling a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file's contents were not valid JSON, or didn't match
    /// the expected shape.
    #[error("failed to parse config file '{path}': {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, ConfigError>;
