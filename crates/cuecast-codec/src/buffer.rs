//! The common decoded-audio representation every decoder produces and
//! every playback backend consumes.

/// The on-the-wire sample representation of an [`AudioBuffer`].
///
/// Decoders preserve the source's bit depth when it's one of `S16`/`S24`/
/// `S32`; `F32`/`U8` exist for backend-side use (e.g. volume scaling
/// intermediates) and aren't currently produced by any decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    S16,
    S24,
    S32,
    F32,
    U8,
}

impl SampleFormat {
    /// Bytes occupied by a single sample in this format.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::S16 => 2,
            SampleFormat::S24 => 3,
            SampleFormat::S32 | SampleFormat::F32 => 4,
        }
    }
}

/// Decoded, interleaved PCM audio plus the metadata needed to play it back.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<u8>,
    pub channels: u32,
    pub sample_rate_hz: u32,
    pub format: SampleFormat,
}

impl AudioBuffer {
    /// Builds a buffer, panicking in debug builds if `samples` is not an
    /// integral multiple of one interleaved frame's byte width.
    pub fn new(samples: Vec<u8>, channels: u32, sample_rate_hz: u32, format: SampleFormat) -> Self {
        debug_assert_eq!(
            samples.len() % (channels as usize * format.bytes_per_sample()),
            0,
            "audio buffer length must be a multiple of the interleaved frame size"
        );
        Self {
            samples,
            channels,
            sample_rate_hz,
            format,
        }
    }

    /// Number of interleaved frames (one sample per channel) in this buffer.
    pub fn frame_count(&self) -> usize {
        let frame_bytes = self.channels as usize * self.format.bytes_per_sample();
        if frame_bytes == 0 {
            0
        } else {
            self.samples.len() / frame_bytes
        }
    }
}
