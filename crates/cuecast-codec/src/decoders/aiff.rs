//! Hand-rolled AIFF decoding: FORM/COMM/SSND chunk parsing plus an 80-bit
//! IEEE-754 extended-precision sample-rate parser. AIFF is big-endian on
//! disk; this decoder byte-swaps everything to the little-endian
//! interleaved PCM the rest of the pipeline expects.

use crate::buffer::{AudioBuffer, SampleFormat};
use crate::decoder::Decoder;
use crate::error::{CodecError, Result};

pub struct AiffDecoder;

impl Decoder for AiffDecoder {
    fn format_name(&self) -> &'static str {
        "aiff"
    }

    fn can_decode(&self, filename: &str) -> bool {
        let lower = filename.to_lowercase();
        lower.ends_with(".aiff") || lower.ends_with(".aif")
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        bytes.len() >= 12 && &bytes[0..4] == b"FORM" && &bytes[8..12] == b"AIFF"
    }

    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        if !self.sniff(bytes) {
            return invalid("missing FORM/AIFF header");
        }

        let mut channels = None;
        let mut sample_rate = None;
        let mut sample_size = None;
        let mut sound_data: Option<&[u8]> = None;

        let mut pos = 12;
        while let Some(header) = bytes.get(pos..pos + 8) {
            let chunk_id = &header[0..4];
            let chunk_size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
            let data_start = pos + 8;
            let data_end = data_start.saturating_add(chunk_size).min(bytes.len());
            let Some(data) = bytes.get(data_start..data_end) else {
                break;
            };

            match chunk_id {
                b"COMM" => {
                    let (c, r, s) = parse_comm(data)?;
                    channels = Some(c);
                    sample_rate = Some(r);
                    sample_size = Some(s);
                }
                b"SSND" => {
                    sound_data = Some(parse_ssnd(data)?);
                }
                _ => {}
            }

            // Chunks are padded to an even byte count.
            pos = data_start + chunk_size + (chunk_size % 2);
        }

        let channels = channels.ok_or_else(|| missing("COMM chunk"))?;
        let sample_rate = sample_rate.ok_or_else(|| missing("COMM chunk"))?;
        let sample_size = sample_size.ok_or_else(|| missing("COMM chunk"))?;
        let sound_data = sound_data.ok_or_else(|| missing("SSND chunk"))?;

        if channels == 0 {
            return invalid("0 channels");
        }
        if sample_rate == 0 {
            return invalid("0 sample rate");
        }

        let format = match sample_size {
            16 => SampleFormat::S16,
            24 => SampleFormat::S24,
            32 => SampleFormat::S32,
            other => return invalid(&format!("unsupported bit depth {other}")),
        };

        let width = format.bytes_per_sample();
        let mut samples = Vec::with_capacity(sound_data.len());
        for chunk in sound_data.chunks_exact(width) {
            samples.extend(chunk.iter().rev());
        }

        Ok(AudioBuffer::new(samples, channels as u32, sample_rate, format))
    }
}

fn parse_comm(data: &[u8]) -> Result<(u16, u32, u16)> {
    if data.len() < 18 {
        return Err(invalid_err("truncated COMM chunk"));
    }
    let channels = u16::from_be_bytes([data[0], data[1]]);
    let sample_size = u16::from_be_bytes([data[6], data[7]]);
    let mut extended = [0u8; 10];
    extended.copy_from_slice(&data[8..18]);
    let sample_rate = extended_to_f64(&extended).round() as u32;
    Ok((channels, sample_rate, sample_size))
}

fn parse_ssnd(data: &[u8]) -> Result<&[u8]> {
    if data.len() < 8 {
        return Err(invalid_err("truncated SSND chunk"));
    }
    let offset = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
    data.get(8 + offset..).ok_or_else(|| invalid_err("SSND offset past end of chunk"))
}

/// Decodes a 10-byte IEEE-754 80-bit extended-precision float, as used by
/// AIFF's `COMM` sample-rate field. General algorithm, not a lookup table:
/// sign and 15-bit biased exponent in the first two bytes, a 64-bit
/// mantissa with an explicit integer bit in the remaining eight.
fn extended_to_f64(bytes: &[u8; 10]) -> f64 {
    let sign = if bytes[0] & 0x80 != 0 { -1.0 } else { 1.0 };
    let biased_exponent = (((bytes[0] as u16 & 0x7F) << 8) | bytes[1] as u16) as i32;

    let mut mantissa: u64 = 0;
    for &byte in &bytes[2..10] {
        mantissa = (mantissa << 8) | byte as u64;
    }

    if biased_exponent == 0 && mantissa == 0 {
        return 0.0;
    }

    let exponent = biased_exponent - 16383 - 63;
    sign * (mantissa as f64) * 2f64.powi(exponent)
}

fn missing(what: &str) -> CodecError {
    invalid_err(&format!("missing {what}"))
}

fn invalid_err(reason: &str) -> CodecError {
    CodecError::InvalidData {
        format: "aiff",
        reason: reason.to_string(),
    }
}

fn invalid<T>(reason: &str) -> Result<T> {
    Err(invalid_err(reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extended_bytes(rate: f64) -> [u8; 10] {
        // Inverse of `extended_to_f64`, only covering the normalized case,
        // which is all real sample rates need.
        let exponent = rate.log2().floor() as i32;
        let mantissa = (rate / 2f64.powi(exponent)) * 2f64.powi(63);
        let mantissa = mantissa.round() as u64;
        let biased = (exponent + 16383) as u16;
        let mut out = [0u8; 10];
        out[0] = (biased >> 8) as u8;
        out[1] = (biased & 0xFF) as u8;
        out[2..10].copy_from_slice(&mantissa.to_be_bytes());
        out
    }

    fn build_aiff(channels: u16, sample_rate: u32, bits: u16, frames: &[i16]) -> Vec<u8> {
        let rate_bytes = extended_bytes(sample_rate as f64);
        let mut comm = Vec::new();
        comm.extend_from_slice(&channels.to_be_bytes());
        comm.extend_from_slice(&(frames.len() as u32 / channels as u32).to_be_bytes());
        comm.extend_from_slice(&bits.to_be_bytes());
        comm.extend_from_slice(&rate_bytes);

        let mut ssnd = Vec::new();
        ssnd.extend_from_slice(&0u32.to_be_bytes()); // offset
        ssnd.extend_from_slice(&0u32.to_be_bytes()); // block size
        for sample in frames {
            ssnd.extend_from_slice(&sample.to_be_bytes());
        }

        let mut body = Vec::new();
        body.extend_from_slice(b"AIFF");
        body.extend_from_slice(b"COMM");
        body.extend_from_slice(&(comm.len() as u32).to_be_bytes());
        body.extend_from_slice(&comm);
        body.extend_from_slice(b"SSND");
        body.extend_from_slice(&(ssnd.len() as u32).to_be_bytes());
        body.extend_from_slice(&ssnd);

        let mut file = Vec::new();
        file.extend_from_slice(b"FORM");
        file.extend_from_slice(&(body.len() as u32).to_be_bytes());
        file.extend_from_slice(&body);
        file
    }

    #[test]
    fn extended_precision_round_trips_44100_and_48000() {
        for rate in [44_100.0, 48_000.0] {
            let bytes = extended_bytes(rate);
            assert_eq!(extended_to_f64(&bytes).round() as u32, rate as u32);
        }
    }

    #[test]
    fn decodes_16_bit_stereo_and_byte_swaps_to_little_endian() {
        let bytes = build_aiff(2, 44_100, 16, &[0x0102, -1, 256, 0]);
        let buf = AiffDecoder.decode(&bytes).unwrap();
        assert_eq!(buf.channels, 2);
        assert_eq!(buf.sample_rate_hz, 44_100);
        assert_eq!(buf.format, SampleFormat::S16);
        // 0x0102 big-endian on disk becomes 0x0201 little-endian decoded.
        assert_eq!(&buf.samples[0..2], &[0x02, 0x01]);
    }

    #[test]
    fn sniffs_form_aiff_header() {
        let bytes = build_aiff(1, 48_000, 16, &[0, 1, 2, 3]);
        assert!(AiffDecoder.sniff(&bytes));
    }

    #[test]
    fn rejects_truncated_comm_chunk() {
        let mut bytes = b"FORM".to_vec();
        bytes.extend_from_slice(&20u32.to_be_bytes());
        bytes.extend_from_slice(b"AIFF");
        bytes.extend_from_slice(b"COMM");
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        let err = AiffDecoder.decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::InvalidData { format: "aiff", .. }));
    }

    #[test]
    fn rejects_missing_ssnd_chunk() {
        let rate_bytes = extended_bytes(44_100.0);
        let mut comm = Vec::new();
        comm.extend_from_slice(&1u16.to_be_bytes());
        comm.extend_from_slice(&0u32.to_be_bytes());
        comm.extend_from_slice(&16u16.to_be_bytes());
        comm.extend_from_slice(&rate_bytes);

        let mut body = Vec::new();
        body.extend_from_slice(b"AIFF");
        body.extend_from_slice(b"COMM");
        body.extend_from_slice(&(comm.len() as u32).to_be_bytes());
        body.extend_from_slice(&comm);

        let mut file = Vec::new();
        file.extend_from_slice(b"FORM");
        file.extend_from_slice(&(body.len() as u32).to_be_bytes());
        file.extend_from_slice(&body);

        let err = AiffDecoder.decode(&file).unwrap_err();
        assert!(matches!(err, CodecError::InvalidData { format: "aiff", .. }));
    }
}
