//! The cpal-backed native playback backend.
//!
//! Every [`AudioSource`] is decoded fully into memory before playback
//! starts; a `Reader` source is spilled to a temp file first so that both
//! source kinds flow through the exact same decode call. The decoded
//! buffer is then streamed into a cpal output callback, one audio-thread
//! write at a time, with volume scaling and channel remapping done
//! per-sample and any space the buffer can't fill written as silence.

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use cuecast_codec::{AudioBuffer, DecoderRegistry, SampleFormat};

use crate::backend::{AudioBackend, clamp_volume};
use crate::cancellation::CancellationToken;
use crate::error::{AudioError, Result};
use crate::source::AudioSource;

/// Extra time given to the playback wait beyond the buffer's nominal
/// duration, so the device has room to finish draining its own buffer.
const PLAYBACK_MARGIN: Duration = Duration::from_millis(500);
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub struct NativeBackend {
    host: cpal::Host,
    volume_bits: Arc<AtomicU32>,
    playing: AtomicBool,
}

impl NativeBackend {
    pub fn new() -> Self {
        tracing::info!("native audio backend initialized");
        Self {
            host: cpal::default_host(),
            volume_bits: Arc::new(AtomicU32::new(1.0f32.to_bits())),
            playing: AtomicBool::new(false),
        }
    }

    fn decode_source(&self, source: AudioSource, registry: &DecoderRegistry) -> Result<AudioBuffer> {
        match source {
            AudioSource::FilePath(path) => Ok(registry.decode_path(&path)?),
            AudioSource::Reader { bytes, format_hint } => {
                let mut temp = tempfile::Builder::new()
                    .suffix(&format!(".{format_hint}"))
                    .tempfile()?;
                temp.write_all(&bytes)?;
                Ok(registry.decode_path(temp.path())?)
            }
        }
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    fn set_volume(&self, volume: f32) {
        self.volume_bits.store(clamp_volume(volume).to_bits(), Ordering::Release);
    }

    fn get_volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Acquire))
    }

    fn play(
        &mut self,
        token: &CancellationToken,
        source: AudioSource,
        registry: &DecoderRegistry,
    ) -> Result<()> {
        let buffer = self.decode_source(source, registry)?;
        let device = self.host.default_output_device().ok_or(AudioError::NoDevice)?;
        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::Stream(e.to_string()))?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        self.playing.store(true, Ordering::Release);
        let result = run_playback(&device, &config, sample_format, buffer, token, &self.volume_bits);
        self.playing.store(false, Ordering::Release);
        result
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

fn run_playback(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    buffer: AudioBuffer,
    token: &CancellationToken,
    volume_bits: &Arc<AtomicU32>,
) -> Result<()> {
    let frame_count = buffer.frame_count();
    let estimated = Duration::from_secs_f64(frame_count as f64 / buffer.sample_rate_hz.max(1) as f64);
    let deadline = estimated + PLAYBACK_MARGIN;

    let shared = Arc::new(PlaybackShared {
        buffer,
        position: AtomicUsize::new(0),
        volume_bits: Arc::clone(volume_bits),
        token: token.clone(),
        device_channels: config.channels as usize,
    });

    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(device, config, Arc::clone(&shared))?,
        cpal::SampleFormat::I16 => build_stream::<i16>(device, config, Arc::clone(&shared))?,
        cpal::SampleFormat::U16 => build_stream::<u16>(device, config, Arc::clone(&shared))?,
        cpal::SampleFormat::I32 => build_stream::<i32>(device, config, Arc::clone(&shared))?,
        other => return Err(AudioError::Stream(format!("unsupported device sample format {other:?}"))),
    };

    stream.play().map_err(|e| AudioError::Stream(e.to_string()))?;

    let start = Instant::now();
    while start.elapsed() < deadline
        && !shared.token.is_cancelled()
        && shared.position.load(Ordering::Acquire) < frame_count
    {
        std::thread::sleep(POLL_INTERVAL);
    }

    drop(stream);
    Ok(())
}

struct PlaybackShared {
    buffer: AudioBuffer,
    position: AtomicUsize,
    volume_bits: Arc<AtomicU32>,
    token: CancellationToken,
    device_channels: usize,
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<PlaybackShared>,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let device_channels = shared.device_channels;
    let stream = device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                write_callback::<T>(data, &shared, device_channels);
            },
            move |err| tracing::warn!(error = %err, "audio stream error"),
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))?;
    Ok(stream)
}

fn write_callback<T>(data: &mut [T], shared: &PlaybackShared, device_channels: usize)
where
    T: SizedSample + FromSample<f32>,
{
    if device_channels == 0 {
        data.fill(T::EQUILIBRIUM);
        return;
    }

    if shared.token.is_cancelled() {
        data.fill(T::EQUILIBRIUM);
        return;
    }

    let volume = f32::from_bits(shared.volume_bits.load(Ordering::Acquire));
    let buffer = &shared.buffer;
    let source_channels = buffer.channels.max(1) as usize;
    let total_frames = buffer.frame_count();

    let frames_requested = data.len() / device_channels;
    let start_frame = shared.position.load(Ordering::Acquire);

    for frame_idx in 0..frames_requested {
        let source_frame = start_frame + frame_idx;
        let out_base = frame_idx * device_channels;

        if source_frame >= total_frames {
            for ch in 0..device_channels {
                data[out_base + ch] = T::EQUILIBRIUM;
            }
            continue;
        }

        for out_ch in 0..device_channels {
            let source_ch = map_channel(out_ch, source_channels);
            let sample = read_normalized(buffer, source_frame, source_channels, source_ch) * volume;
            data[out_base + out_ch] = T::from_sample(sample);
        }
    }

    shared
        .position
        .store(start_frame + frames_requested, Ordering::Release);
}

/// Maps an output channel index onto a source channel index when the
/// device and the decoded buffer disagree on channel count: mono sources
/// fan out to every output channel, and surplus output channels beyond
/// the source's count repeat the last available source channel.
fn map_channel(out_channel: usize, source_channels: usize) -> usize {
    if source_channels <= 1 {
        0
    } else if out_channel < source_channels {
        out_channel
    } else {
        source_channels - 1
    }
}

fn read_normalized(buffer: &AudioBuffer, frame: usize, channels: usize, channel: usize) -> f32 {
    let width = buffer.format.bytes_per_sample();
    let offset = (frame * channels + channel) * width;
    let Some(bytes) = buffer.samples.get(offset..offset + width) else {
        return 0.0;
    };

    match buffer.format {
        SampleFormat::S16 => {
            let raw = i16::from_le_bytes([bytes[0], bytes[1]]);
            raw as f32 / 32_768.0
        }
        SampleFormat::S24 => {
            let sign_byte = if bytes[2] & 0x80 != 0 { 0xFF } else { 0x00 };
            let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], sign_byte]);
            raw as f32 / 8_388_608.0
        }
        SampleFormat::S32 => {
            let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            raw as f32 / 2_147_483_648.0
        }
        SampleFormat::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        SampleFormat::U8 => (bytes[0] as f32 - 128.0) / 128.0,
    }
}
