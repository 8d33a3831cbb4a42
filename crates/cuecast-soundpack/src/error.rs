use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or resolving a soundpack.
#[derive(Debug, Error)]
pub enum SoundpackError {
    /// A JSON soundpack document could not be read.
    #[error("failed to read soundpack document at {path}")]
    ReadDoc {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON soundpack document was not valid JSON or did not match the
    /// expected shape.
    #[error("failed to parse soundpack document at {path}")]
    ParseDoc {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON soundpack maps a logical path to a file that does not exist.
    #[error("soundpack {pack} maps {logical} to missing file {target}")]
    MissingMappedFile {
        pack: String,
        logical: String,
        target: PathBuf,
    },

    /// A JSON soundpack has no `default` entry.
    #[error("soundpack {pack} has no default entry")]
    MissingDefault { pack: String },

    /// A JSON soundpack document has an empty `name` field.
    #[error("soundpack document at {path} has an empty name")]
    EmptyName { path: PathBuf },
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, SoundpackError>;
