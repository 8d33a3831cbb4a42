//! The object-safe trait every format decoder implements.

use crate::buffer::AudioBuffer;
use crate::error::Result;

/// A single audio format's detection and decode logic.
///
/// Implementations read the entire payload into a decoded [`AudioBuffer`]
/// in one call; cuecast only ever plays short one-shot cues, so there is
/// no streaming path.
pub trait Decoder: Send + Sync {
    /// Short, lowercase format identifier used in logs and telemetry.
    fn format_name(&self) -> &'static str;

    /// Whether this decoder normally handles files named like `filename`.
    /// Used only as a fallback when magic-byte sniffing finds no match.
    fn can_decode(&self, filename: &str) -> bool;

    /// Whether the leading bytes of the source identify this format,
    /// regardless of what the file is named.
    fn sniff(&self, bytes: &[u8]) -> bool;

    /// Decodes the full in-memory payload into an [`AudioBuffer`].
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer>;
}
