use thiserror::Error;

/// Errors raised while reading and parsing a hook event.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The event payload exceeded the maximum accepted size.
    #[error("hook event payload of {actual} bytes exceeds the {max} byte limit")]
    PayloadTooLarge {
        /// Bytes actually read before the limit was hit.
        actual: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Reading the event payload from its source failed.
    #[error("failed to read hook event payload")]
    Read(#[source] std::io::Error),

    /// The payload was not valid JSON, or did not match the expected shape.
    #[error("failed to parse hook event JSON")]
    InvalidJson(#[source] serde_json::Error),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, CoreError>;
