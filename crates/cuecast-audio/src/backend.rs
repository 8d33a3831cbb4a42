//! The trait every playback backend (native or external command) implements.

use cuecast_codec::DecoderRegistry;

use crate::cancellation::CancellationToken;
use crate::error::Result;
use crate::source::AudioSource;

/// A playback backend: something that can turn an [`AudioSource`] into
/// sound, honoring a shared volume level and cooperative cancellation.
///
/// `play` is expected to block until the sound finishes or the token
/// fires; there is no async completion callback, since the engine makes
/// exactly one playback call per process invocation.
pub trait AudioBackend: Send {
    /// Short, lowercase identifier used in logs (`"native"`, `"command"`).
    fn name(&self) -> &'static str;

    /// Whether a sound is currently mid-playback.
    fn is_playing(&self) -> bool;

    /// Sets the output volume, clamped to `0.0..=1.0`.
    fn set_volume(&self, volume: f32);

    /// The current output volume.
    fn get_volume(&self) -> f32;

    /// Plays `source` to completion or until `token` is cancelled.
    ///
    /// `registry` is used to detect and decode the source's audio format.
    fn play(
        &mut self,
        token: &CancellationToken,
        source: AudioSource,
        registry: &DecoderRegistry,
    ) -> Result<()>;

    /// Releases any held device or process resources. Called exactly once,
    /// on every exit path, after `play` returns (successfully or not).
    fn close(&mut self) -> Result<()>;
}

pub(crate) fn clamp_volume(volume: f32) -> f32 {
    volume.clamp(0.0, 1.0)
}
