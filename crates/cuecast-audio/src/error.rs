use thiserror::Error;

/// Errors raised while selecting a backend or playing a sound through one.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device is available on the host.
    #[error("no audio output device available")]
    NoDevice,

    /// Building or running a cpal stream failed.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// The configured backend name is not one of `auto`/`native`/`command`.
    #[error("invalid audio backend '{0}', expected auto, native, or command")]
    InvalidBackend(String),

    /// An explicit `command` backend was requested but no player was found
    /// on `PATH`.
    #[error("no external audio player found on PATH (tried: {tried})")]
    CommandNotFound { tried: String },

    /// The external player exited with a non-zero status.
    #[error("external player '{command}' exited with status {status}")]
    CommandFailed { command: String, status: i32 },

    /// Decoding the source audio failed.
    #[error(transparent)]
    Decode(#[from] cuecast_codec::CodecError),

    /// An I/O operation (spilling a reader to a temp file, spawning a
    /// child process) failed.
    #[error("audio I/O error")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, AudioError>;
