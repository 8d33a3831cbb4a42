//! The typed configuration surface and its built-in defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// `log_level` values accepted by the config file, environment, and the
/// `tracing` subscriber initialized from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// The `tracing` filter directive this level corresponds to.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// The three valid `audio_backend` values. Config itself carries the raw
/// string through layering; `cuecast-audio::BackendKind::parse` does the
/// authoritative validation at the point a backend is actually built.
pub const VALID_AUDIO_BACKENDS: &[&str] = &["auto", "native", "command"];

/// Rotating file-logging settings, mirrored in `cuecast-cli`'s logging
/// initialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub directory: Option<PathBuf>,
    pub max_size_bytes: u64,
    pub max_age_days: u32,
    pub max_backups: u32,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
            max_size_bytes: 10 * 1024 * 1024,
            max_age_days: 14,
            max_backups: 5,
        }
    }
}

/// Optional SQLite resolution-telemetry sink settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoundTrackingConfig {
    pub enabled: bool,
    pub db_path: Option<PathBuf>,
}

impl Default for SoundTrackingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            db_path: None,
        }
    }
}

/// The fully layered configuration consumed by every downstream component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub volume: f32,
    pub default_soundpack: String,
    pub soundpack_paths: Vec<String>,
    pub enabled: bool,
    pub log_level: LogLevel,
    pub audio_backend: String,
    pub file_logging: FileLoggingConfig,
    pub sound_tracking: SoundTrackingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            volume: 0.5,
            default_soundpack: "default".to_string(),
            soundpack_paths: Vec::new(),
            enabled: true,
            log_level: LogLevel::Warn,
            audio_backend: "auto".to_string(),
            file_logging: FileLoggingConfig::default(),
            sound_tracking: SoundTrackingConfig::default(),
        }
    }
}
