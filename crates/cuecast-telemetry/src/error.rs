use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while opening or writing to the telemetry database.
///
/// Every variant here is meant to be logged and swallowed by the caller;
/// telemetry failure never aborts an invocation.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to open the SQLite database file.
    #[error("failed to open telemetry database '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the `hook_events`/`path_lookups` tables.
    #[error("failed to apply telemetry schema to '{path}': {source}")]
    Migrate {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to insert a row.
    #[error("failed to record telemetry row: {source}")]
    Insert {
        #[source]
        source: rusqlite::Error,
    },

    /// The database path has no parent directory that could be created.
    #[error("failed to create telemetry directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, TelemetryError>;
