//! Initializes the single, ambient `tracing` subscriber used by every
//! component for the lifetime of the process.
//!
//! Two sinks: `stderr`, filtered by the configured log level, and an
//! optional size/age-rotating file under the XDG log directory.
//! `tracing-appender`'s built-in rotation is purely time-based, so the
//! size/backup-count rotation the config surface exposes is implemented
//! here with a small [`RotatingWriter`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use cuecast_config::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "cuecast.log";

/// Initializes stderr and (when enabled) rotating file logging from
/// `config`. Must be called exactly once, before any other component runs.
pub fn init(config: &Config) {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_level.as_filter_str().into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_filter(filter());

    if !config.file_logging.enabled {
        tracing_subscriber::registry().with(stderr_layer).init();
        return;
    }

    let directory = config
        .file_logging
        .directory
        .clone()
        .unwrap_or_else(log_dir);

    match RotatingWriter::new(
        directory,
        config.file_logging.max_size_bytes,
        config.file_logging.max_age_days,
        config.file_logging.max_backups,
    ) {
        Ok(writer) => {
            // Non-blocking keeps file I/O off the pipeline's hot path; the
            // worker guard must outlive the subscriber, so it's leaked for
            // the remainder of this short-lived process.
            let (non_blocking, guard) = tracing_appender::non_blocking(writer);
            Box::leak(Box::new(guard));

            let file_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(filter());
            tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();
        }
        Err(err) => {
            tracing_subscriber::registry().with(stderr_layer).init();
            tracing::warn!(error = %err, "failed to initialize file logging, stderr only");
        }
    }
}

fn log_dir() -> PathBuf {
    cuecast_platform::cache_dir().join("logs")
}

/// A `Write` implementation that rotates `cuecast.log` to `.1`, `.2`, ... up
/// to `max_backups` once it exceeds `max_size_bytes` or is older than
/// `max_age_days`.
struct RotatingWriter {
    directory: PathBuf,
    max_size_bytes: u64,
    max_age_days: u32,
    max_backups: u32,
    file: File,
    written: u64,
}

impl RotatingWriter {
    fn new(directory: PathBuf, max_size_bytes: u64, max_age_days: u32, max_backups: u32) -> io::Result<Self> {
        fs::create_dir_all(&directory)?;
        let path = directory.join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            directory,
            max_size_bytes,
            max_age_days,
            max_backups,
            file,
            written,
        })
    }

    fn path(&self) -> PathBuf {
        self.directory.join(LOG_FILE_NAME)
    }

    fn should_rotate(&self) -> bool {
        if self.written >= self.max_size_bytes {
            return true;
        }
        let Ok(metadata) = self.file.metadata() else {
            return false;
        };
        let Ok(age) = metadata.modified().and_then(|m| m.elapsed().map_err(io::Error::other)) else {
            return false;
        };
        age.as_secs() >= u64::from(self.max_age_days) * 86_400
    }

    fn rotate(&mut self) -> io::Result<()> {
        let base = self.path();
        for index in (1..self.max_backups).rev() {
            let src = base.with_extension(format!("log.{index}"));
            let dst = base.with_extension(format!("log.{}", index + 1));
            if src.exists() {
                fs::rename(&src, &dst)?;
            }
        }
        if self.max_backups > 0 && base.exists() {
            fs::rename(&base, base.with_extension("log.1"))?;
        }
        self.file = OpenOptions::new().create(true).append(true).open(&base)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.should_rotate() {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_the_log_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("logs");
        let mut writer = RotatingWriter::new(target.clone(), 1024, 14, 5).unwrap();
        writer.write_all(b"hello\n").unwrap();
        assert!(target.join("cuecast.log").exists());
    }

    #[test]
    fn rotates_when_size_exceeded() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RotatingWriter::new(dir.path().to_path_buf(), 8, 14, 3).unwrap();
        writer.write_all(b"0123456789").unwrap();
        writer.write_all(b"more").unwrap();
        assert!(dir.path().join("cuecast.log.1").exists());
        assert!(dir.path().join("cuecast.log").exists());
    }

    #[test]
    fn keeps_backups_bounded_by_max_backups() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RotatingWriter::new(dir.path().to_path_buf(), 4, 14, 2).unwrap();
        for _ in 0..5 {
            writer.write_all(b"12345").unwrap();
        }
        assert!(!dir.path().join("cuecast.log.3").exists());
    }
}
