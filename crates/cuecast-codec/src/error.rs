use thiserror::Error;

/// Errors raised while detecting or decoding an audio file.
#[derive(Debug, Error)]
pub enum CodecError {
    /// No registered decoder claimed the bytes by magic number or by the
    /// source's filename extension.
    #[error("unsupported audio format for {hint}")]
    UnsupportedFormat { hint: String },

    /// A decoder recognized the format but the payload was malformed
    /// (zero channels, zero sample rate, truncated chunks, ...).
    #[error("invalid {format} data: {reason}")]
    InvalidData { format: &'static str, reason: String },

    /// Reading the source failed before decoding could begin.
    #[error("failed to read audio source")]
    Io(#[from] std::io::Error),

    /// The underlying WAV library rejected the file.
    #[error("wav decode failed")]
    Wav(#[from] hound::Error),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, CodecError>;
