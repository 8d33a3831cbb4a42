//! MPEG-1/2 Layer III decoding via `minimp3`, always emitting stereo S16.

use std::io::Cursor;

use crate::buffer::{AudioBuffer, SampleFormat};
use crate::decoder::Decoder;
use crate::error::{CodecError, Result};

pub struct Mp3Decoder;

impl Decoder for Mp3Decoder {
    fn format_name(&self) -> &'static str {
        "mp3"
    }

    fn can_decode(&self, filename: &str) -> bool {
        filename.to_lowercase().ends_with(".mp3")
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        if bytes.len() >= 3 && &bytes[0..3] == b"ID3" {
            return true;
        }
        // MPEG frame sync: 11 set high bits, then layer/version bits set.
        bytes.len() >= 2 && bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0
    }

    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        let mut decoder = minimp3::Decoder::new(Cursor::new(bytes));
        let mut pcm = Vec::new();
        let mut sample_rate: i32 = 0;
        let mut decoded_any = false;

        loop {
            match decoder.next_frame() {
                Ok(frame) => {
                    decoded_any = true;
                    sample_rate = frame.sample_rate;
                    if frame.channels == 1 {
                        for sample in &frame.data {
                            let le = sample.to_le_bytes();
                            pcm.extend_from_slice(&le);
                            pcm.extend_from_slice(&le);
                        }
                    } else {
                        for sample in &frame.data {
                            pcm.extend_from_slice(&sample.to_le_bytes());
                        }
                    }
                }
                Err(minimp3::Error::Eof) => break,
                Err(err) => {
                    return Err(CodecError::InvalidData {
                        format: "mp3",
                        reason: err.to_string(),
                    });
                }
            }
        }

        if !decoded_any || sample_rate <= 0 {
            return Err(CodecError::InvalidData {
                format: "mp3",
                reason: "no decodable frames".to_string(),
            });
        }

        Ok(AudioBuffer::new(pcm, 2, sample_rate as u32, SampleFormat::S16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_id3_tag() {
        assert!(Mp3Decoder.sniff(b"ID3\x03\x00\x00\x00\x00\x00\x00"));
    }

    #[test]
    fn sniffs_mpeg_frame_sync() {
        assert!(Mp3Decoder.sniff(&[0xFF, 0xFB, 0x90, 0x00]));
    }

    #[test]
    fn does_not_sniff_wav() {
        assert!(!Mp3Decoder.sniff(b"RIFF....WAVEfmt "));
    }

    #[test]
    fn rejects_empty_input_as_invalid_data() {
        let err = Mp3Decoder.decode(&[]).unwrap_err();
        assert!(matches!(err, CodecError::InvalidData { format: "mp3", .. }));
    }

    #[test]
    fn can_decode_checks_extension_case_insensitively() {
        assert!(Mp3Decoder.can_decode("cue.MP3"));
        assert!(!Mp3Decoder.can_decode("cue.wav"));
    }
}
