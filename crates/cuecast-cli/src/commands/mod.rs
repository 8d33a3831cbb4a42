pub mod install;
pub mod uninstall;

use std::path::{Path, PathBuf};

/// Default path to the host's settings file: `~/.claude/settings.json`.
pub fn default_settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".claude")
        .join("settings.json")
}

pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map(Path::to_path_buf).unwrap_or_else(default_settings_path)
}
