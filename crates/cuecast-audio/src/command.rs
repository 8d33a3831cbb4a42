//! The external-process playback backend, used on platforms (notably WSL)
//! where cpal has no usable device to talk to.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use cuecast_codec::DecoderRegistry;

use crate::backend::{AudioBackend, clamp_volume};
use crate::cancellation::CancellationToken;
use crate::error::{AudioError, Result};
use crate::source::AudioSource;

const KILL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Plays sounds by spawning an external player binary (`paplay`, `ffplay`,
/// `aplay`, `afplay`, ...) as a child process and passing it a file path.
///
/// Volume is not applied by this backend: the spawned players used here
/// don't expose a uniform per-invocation volume flag, so `set_volume`
/// only updates the stored value for reporting.
pub struct CommandBackend {
    command: PathBuf,
    volume_bits: AtomicU32,
    playing: AtomicBool,
}

impl CommandBackend {
    pub fn new(command: PathBuf) -> Self {
        Self {
            command,
            volume_bits: AtomicU32::new(1.0f32.to_bits()),
            playing: AtomicBool::new(false),
        }
    }

    fn spill_to_temp(bytes: &[u8], format_hint: &str) -> Result<tempfile::NamedTempFile> {
        let mut temp = tempfile::Builder::new()
            .suffix(&format!(".{format_hint}"))
            .tempfile()?;
        temp.write_all(bytes)?;
        Ok(temp)
    }

    fn wait_with_cancellation(mut child: Child, token: &CancellationToken) -> Result<()> {
        loop {
            if let Some(status) = child.try_wait()? {
                if status.success() {
                    return Ok(());
                }
                return Err(AudioError::CommandFailed {
                    command: "player".to_string(),
                    status: status.code().unwrap_or(-1),
                });
            }

            if token.is_cancelled() {
                let _ = child.kill();
                let _ = child.wait();
                return Ok(());
            }

            thread::sleep(KILL_POLL_INTERVAL);
        }
    }
}

impl AudioBackend for CommandBackend {
    fn name(&self) -> &'static str {
        "command"
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
        _registry: &DecoderRegistry,
    ) -> Result<()> {
        // Held for the lifetime of the child process so the temp file it
        // reads from isn't removed out from under it.
        let _temp_guard;
        let path: PathBuf = match source {
            AudioSource::FilePath(path) => path,
            AudioSource::Reader { bytes, format_hint } => {
                let temp = Self::spill_to_temp(&bytes, &format_hint)?;
                let path = temp.path().to_path_buf();
                _temp_guard = temp;
                path
            }
        };

        self.playing.store(true, Ordering::Release);
        let child = Command::new(&self.command)
            .arg(&path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let result = Self::wait_with_cancellation(child, token);
        self.playing.store(false, Ordering::Release);
        result.map_err(|err| {
            if let AudioError::CommandFailed { status, .. } = err {
                AudioError::CommandFailed {
                    command: self.command.display().to_string(),
                    status,
                }
            } else {
                err
            }
        })
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuecast_codec::DecoderRegistry;

    #[test]
    fn plays_a_file_with_a_harmless_command() {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("cue.wav");
        std::fs::write(&sound, b"not real audio, command backend never decodes it").unwrap();

        let mut backend = CommandBackend::new(PathBuf::from("true"));
        let token = CancellationToken::new();
        let registry = DecoderRegistry::default();
        let result = backend.play(&token, AudioSource::FilePath(sound), &registry);
        assert!(result.is_ok());
    }

    #[test]
    fn nonzero_exit_is_reported_as_command_failed() {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("cue.wav");
        std::fs::write(&sound, b"data").unwrap();

        let mut backend = CommandBackend::new(PathBuf::from("false"));
        let token = CancellationToken::new();
        let registry = DecoderRegistry::default();
        let err = backend
            .play(&token, AudioSource::FilePath(sound), &registry)
            .unwrap_err();
        assert!(matches!(err, AudioError::CommandFailed { .. }));
    }

    #[test]
    fn cancellation_kills_the_child_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let sound = dir.path().join("cue.wav");
        std::fs::write(&sound, b"data").unwrap();

        // `yes` repeats its argument forever until killed, regardless of
        // whether it's a valid path, giving a reliably long-running child.
        let mut backend = CommandBackend::new(PathBuf::from("yes"));
        let token = CancellationToken::new();
        token.cancel();
        let registry = DecoderRegistry::default();
        let result = backend.play(&token, AudioSource::FilePath(sound), &registry);
        assert!(result.is_ok());
    }
}
