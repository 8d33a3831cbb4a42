//! WAV decoding via `hound`, preserving the source's integer bit depth.

use std::io::Cursor;

use crate::buffer::{AudioBuffer, SampleFormat};
use crate::decoder::Decoder;
use crate::error::{CodecError, Result};

pub struct WavDecoder;

impl Decoder for WavDecoder {
    fn format_name(&self) -> &'static str {
        "wav"
    }

    fn can_decode(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(".wav")
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
    }

    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        if spec.channels == 0 {
            return Err(CodecError::InvalidData {
                format: "wav",
                reason: "0 channels".to_string(),
            });
        }
        if spec.sample_rate == 0 {
            return Err(CodecError::InvalidData {
                format: "wav",
                reason: "0 sample rate".to_string(),
            });
        }

        let format = match spec.bits_per_sample {
            16 => SampleFormat::S16,
            24 => SampleFormat::S24,
            32 => SampleFormat::S32,
            other => {
                return Err(CodecError::InvalidData {
                    format: "wav",
                    reason: format!("unsupported bit depth {other}"),
                });
            }
        };

        let mut samples = Vec::new();
        match format {
            SampleFormat::S16 => {
                for sample in reader.samples::<i16>() {
                    samples.extend_from_slice(&sample?.to_le_bytes());
                }
            }
            SampleFormat::S24 => {
                for sample in reader.samples::<i32>() {
                    let bytes = sample?.to_le_bytes();
                    samples.extend_from_slice(&bytes[0..3]);
                }
            }
            SampleFormat::S32 => {
                for sample in reader.samples::<i32>() {
                    samples.extend_from_slice(&sample?.to_le_bytes());
                }
            }
            SampleFormat::F32 | SampleFormat::U8 => unreachable!("not a WAV bit depth"),
        }

        Ok(AudioBuffer::new(
            samples,
            spec.channels as u32,
            spec.sample_rate,
            format,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(bits: u16, channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: bits,
            sample_format: hound::SampleFormat::Int,
        };
        let mut buf = Vec::new();
        {
            let mut writer = hound::WavWriter::new(Cursor::new(&mut buf), spec).unwrap();
            for frame in 0..10 {
                for _ in 0..channels {
                    match bits {
                        16 => writer.write_sample(frame as i16 * 100).unwrap(),
                        24 | 32 => writer.write_sample(frame as i32 * 1000).unwrap(),
                        _ => unreachable!(),
                    }
                }
            }
            writer.finalize().unwrap();
        }
        buf
    }

    #[test]
    fn sniffs_riff_wave_header() {
        let bytes = write_test_wav(16, 2, 44_100);
        assert!(WavDecoder.sniff(&bytes));
    }

    #[test]
    fn decodes_16_bit_stereo_preserving_format() {
        let bytes = write_test_wav(16, 2, 44_100);
        let buf = WavDecoder.decode(&bytes).unwrap();
        assert_eq!(buf.format, SampleFormat::S16);
        assert_eq!(buf.channels, 2);
        assert_eq!(buf.sample_rate_hz, 44_100);
        assert_eq!(buf.frame_count(), 10);
    }

    #[test]
    fn decodes_24_bit_mono() {
        let bytes = write_test_wav(24, 1, 48_000);
        let buf = WavDecoder.decode(&bytes).unwrap();
        assert_eq!(buf.format, SampleFormat::S24);
        assert_eq!(buf.channels, 1);
        assert_eq!(buf.samples.len(), 10 * 3);
    }

    #[test]
    fn decodes_32_bit_stereo() {
        let bytes = write_test_wav(32, 2, 96_000);
        let buf = WavDecoder.decode(&bytes).unwrap();
        assert_eq!(buf.format, SampleFormat::S32);
        assert_eq!(buf.samples.len(), 10 * 2 * 4);
    }

    #[test]
    fn can_decode_checks_extension_case_insensitively() {
        assert!(WavDecoder.can_decode("cue.WAV"));
        assert!(!WavDecoder.can_decode("cue.mp3"));
    }
}
