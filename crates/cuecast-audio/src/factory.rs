//! Picks an [`AudioBackend`] implementation from a configured backend name
//! plus runtime platform probing.

use crate::backend::AudioBackend;
use crate::command::CommandBackend;
use crate::error::{AudioError, Result};
use crate::native::NativeBackend;

/// External players tried, in priority order, when a `command` backend is
/// selected without the caller naming one explicitly.
pub const COMMAND_CANDIDATES: &[&str] = &["paplay", "ffplay", "aplay", "afplay"];

/// The three backend names the configuration surface accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Auto,
    Native,
    Command,
}

impl BackendKind {
    /// Parses a config/env string into a [`BackendKind`].
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "auto" => Ok(BackendKind::Auto),
            "native" => Ok(BackendKind::Native),
            "command" => Ok(BackendKind::Command),
            other => Err(AudioError::InvalidBackend(other.to_string())),
        }
    }
}

/// Builds the backend to use for this invocation, given the configured
/// [`BackendKind`] and the platform's WSL/PATH state.
///
/// `is_wsl` and `find_on_path` are injected rather than called directly so
/// the selection logic itself stays a pure, unit-testable function.
pub fn build_backend(
    kind: BackendKind,
    is_wsl: bool,
    find_on_path: impl Fn(&str) -> Option<std::path::PathBuf>,
) -> Result<Box<dyn AudioBackend>> {
    match kind {
        BackendKind::Native => Ok(Box::new(NativeBackend::new())),
        BackendKind::Command => {
            let command = resolve_command(&find_on_path)?;
            Ok(Box::new(CommandBackend::new(command)))
        }
        BackendKind::Auto if is_wsl => match resolve_command(&find_on_path) {
            Ok(command) => Ok(Box::new(CommandBackend::new(command))),
            Err(_) => {
                tracing::warn!("on WSL with no usable external player on PATH, falling back to native");
                Ok(Box::new(NativeBackend::new()))
            }
        },
        BackendKind::Auto => Ok(Box::new(NativeBackend::new())),
    }
}

fn resolve_command(find_on_path: &impl Fn(&str) -> Option<std::path::PathBuf>) -> Result<std::path::PathBuf> {
    COMMAND_CANDIDATES
        .iter()
        .find_map(|name| find_on_path(name))
        .ok_or_else(|| AudioError::CommandNotFound {
            tried: COMMAND_CANDIDATES.join(", "),
        })
}
