//! Layers a [`Config`] from built-in defaults, an optional JSON file, and
//! `CUECAST_*` environment variables, in that priority order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::model::{Config, LogLevel};

/// Default filename looked up under [`cuecast_platform::config_dir`] when
/// the caller doesn't pass an explicit path.
pub const DEFAULT_CONFIG_FILENAME: &str = "config.json";

/// Returns the default config file location: `<config_dir>/config.json`.
pub fn default_config_path() -> PathBuf {
    cuecast_platform::config_dir().join(DEFAULT_CONFIG_FILENAME)
}

/// Loads a [`Config`] using the standard config directory and the real
/// process environment.
///
/// Missing config files are not an error; [`Config::default`] plus any
/// environment overrides is a perfectly valid configuration.
pub fn load(explicit_path: Option<&Path>) -> Result<Config> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    let env: HashMap<String, String> = std::env::vars().collect();
    load_from(path.as_path(), explicit_path.is_some(), &env)
}

/// The actual layering logic, with the file path and environment passed in
/// explicitly so it can be exercised without touching real process state.
///
/// `path_is_explicit` controls whether a missing file is silently skipped
/// (the default-location case) or surfaced as an error (the caller asked
/// for a specific file that isn't there).
pub fn load_from(path: &Path, path_is_explicit: bool, env: &HashMap<String, String>) -> Result<Config> {
    let mut config = match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound && !path_is_explicit => Config::default(),
        Err(source) => {
            return Err(ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    apply_env_overrides(&mut config, env);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config, env: &HashMap<String, String>) {
    if let Some(raw) = env.get("CUECAST_VOLUME") {
        match raw.parse::<f32>() {
            Ok(value) => config.volume = value,
            Err(_) => tracing::warn!(value = raw, "ignoring invalid CUECAST_VOLUME"),
        }
    }

    if let Some(raw) = env.get("CUECAST_SOUNDPACK") {
        config.default_soundpack = raw.clone();
    }

    if let Some(raw) = env.get("CUECAST_ENABLED") {
        match parse_bool(raw) {
            Some(value) => config.enabled = value,
            None => tracing::warn!(value = raw, "ignoring invalid CUECAST_ENABLED"),
        }
    }

    if let Some(raw) = env.get("CUECAST_LOG_LEVEL") {
        match LogLevel::parse(raw) {
            Some(value) => config.log_level = value,
            None => tracing::warn!(value = raw, "ignoring invalid CUECAST_LOG_LEVEL"),
        }
    }

    if let Some(raw) = env.get("CUECAST_AUDIO_BACKEND") {
        if crate::model::VALID_AUDIO_BACKENDS.contains(&raw.as_str()) {
            config.audio_backend = raw.clone();
        } else {
            tracing::warn!(value = raw, "ignoring invalid CUECAST_AUDIO_BACKEND");
        }
    }

    if let Some(raw) = env.get("CUECAST_SOUND_TRACKING") {
        match parse_bool(raw) {
            Some(value) => config.sound_tracking.enabled = value,
            None => tracing::warn!(value = raw, "ignoring invalid CUECAST_SOUND_TRACKING"),
        }
    }

    if let Some(raw) = env.get("CUECAST_SOUND_TRACKING_DB") {
        config.sound_tracking.db_path = Some(PathBuf::from(raw));
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
