//! WSL (Windows Subsystem for Linux) detection.
//!
//! The backend factory uses this to prefer a command-line audio player over
//! the native cpal stack, since WSL generally has no usable ALSA/PulseAudio
//! device attached to the kernel's audio subsystem.

use std::fs;

/// Returns `true` if the current process appears to be running under WSL.
///
/// Checks `/proc/version` for a "microsoft"/"wsl" marker, then falls back to
/// the `WSL_DISTRO_NAME`/`WSL_INTEROP` environment variables that the WSL
/// runtime sets for every process it spawns.
pub fn is_wsl() -> bool {
    let proc_version = fs::read_to_string("/proc/version").ok();
    is_wsl_from(proc_version.as_deref(), |name| std::env::var(name).ok())
}

fn is_wsl_from(proc_version: Option<&str>, env: impl Fn(&str) -> Option<String>) -> bool {
    if let Some(version) = proc_version {
        let lower = version.to_lowercase();
        if lower.contains("microsoft") || lower.contains("wsl") {
            return true;
        }
    }
    env("WSL_DISTRO_NAME").is_some() || env("WSL_INTEROP").is_some()
}
