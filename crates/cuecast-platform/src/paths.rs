//! XDG-aware directories for configuration, cache, and data files.
//!
//! # Platform Paths
//!
//! - Linux: `~/.config/cuecast/`, `~/.cache/cuecast/`, `~/.local/share/cuecast/`
//! - macOS: `~/Library/Application Support/cuecast/`, `~/Library/Caches/cuecast/`
//! - Windows: `%APPDATA%\cuecast\`

use std::path::PathBuf;

/// Application name used for directory paths.
pub const APP_NAME: &str = "cuecast";

/// Returns the user's configuration directory for cuecast.
///
/// Falls back to the current directory if no config directory can be
/// determined for the platform.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user's cache directory for cuecast.
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user's data directory for cuecast (soundpacks, telemetry db).
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
