//! Format detection and decoder dispatch.

use crate::buffer::AudioBuffer;
use crate::decoder::Decoder;
use crate::decoders::{aiff::AiffDecoder, mp3::Mp3Decoder, wav::WavDecoder};
use crate::error::{CodecError, Result};

/// An ordered list of [`Decoder`]s, probed first by magic bytes and then
/// by filename extension.
///
/// Registration order is the tie-break between decoders that could both
/// plausibly claim a file; [`DecoderRegistry::default`] registers WAV,
/// MP3, then AIFF, matching the priority the resolver uses for file
/// extensions.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    /// An empty registry with no decoders installed.
    pub fn empty() -> Self {
        Self { decoders: Vec::new() }
    }

    /// Appends a decoder, giving it lower priority than any already
    /// registered.
    pub fn register(&mut self, decoder: Box<dyn Decoder>) {
        self.decoders.push(decoder);
    }

    /// Reads `filename`'s bytes from disk and decodes them.
    pub fn decode_path(&self, path: &std::path::Path) -> Result<AudioBuffer> {
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        self.decode_bytes(&bytes, filename)
    }

    /// Detects the format of `bytes` and decodes it, consulting `filename`
    /// only if no decoder claims the bytes by magic number.
    pub fn decode_bytes(&self, bytes: &[u8], filename: &str) -> Result<AudioBuffer> {
        if let Some(decoder) = self.decoders.iter().find(|d| d.sniff(bytes)) {
            tracing::debug!(format = decoder.format_name(), "matched by magic bytes");
            return decoder.decode(bytes);
        }

        if let Some(decoder) = self.decoders.iter().find(|d| d.can_decode(filename)) {
            tracing::debug!(format = decoder.format_name(), filename, "matched by extension");
            return decoder.decode(bytes);
        }

        Err(CodecError::UnsupportedFormat {
            hint: filename.to_string(),
        })
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(WavDecoder));
        registry.register(Box::new(Mp3Decoder));
        registry.register(Box::new(AiffDecoder));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes_win_over_mismatched_extension() {
        let registry = DecoderRegistry::default();
        let wav_bytes = {
            let spec = hound::WavSpec {
                channels: 1,
                sample_rate: 44_100,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            let mut buf = Vec::new();
            {
                let mut writer =
                    hound::WavWriter::new(std::io::Cursor::new(&mut buf), spec).unwrap();
                writer.write_sample(0i16).unwrap();
                writer.finalize().unwrap();
            }
            buf
        };

        // Named .mp3 but actually WAV bytes: magic detection should still
        // pick the WAV decoder.
        let decoded = registry.decode_bytes(&wav_bytes, "cue.mp3").unwrap();
        assert_eq!(decoded.channels, 1);
    }

    #[test]
    fn falls_back_to_extension_when_no_magic_match() {
        let registry = DecoderRegistry::default();
        // Not a real AIFF payload, but named like one and no decoder
        // sniffs it, so extension dispatch should still pick AiffDecoder
        // and surface its own parse error rather than UnsupportedFormat.
        let err = registry.decode_bytes(b"not actually audio", "cue.aiff").unwrap_err();
        assert!(matches!(err, CodecError::InvalidData { format: "aiff", .. }));
    }

    #[test]
    fn unrecognized_bytes_and_extension_are_unsupported() {
        let registry = DecoderRegistry::default();
        let err = registry.decode_bytes(b"garbage", "cue.xyz").unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat { .. }));
    }
}
