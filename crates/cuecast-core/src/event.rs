//! Raw hook event deserialization and bounded stdin reading.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Hard ceiling on the size of a hook event payload, in bytes.
///
/// A malformed or hostile caller piping an unbounded stream into the
/// process must not be able to exhaust memory.
pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// The `hook_event_name` values the host assistant is known to emit.
///
/// Unknown names deserialize to [`HookEventName::Unknown`] rather than
/// failing the whole payload, since new hook types are expected to appear
/// over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum HookEventName {
    PreToolUse,
    PostToolUse,
    UserPromptSubmit,
    Notification,
    Stop,
    SubagentStop,
    PreCompact,
    #[serde(other)]
    Unknown,
}

/// The raw JSON object the assistant's hook runner writes to stdin.
///
/// Every field is optional: different `hook_event_name` values populate
/// different subsets, and unrecognized fields are silently ignored by
/// `serde`'s default behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub hook_event_name: Option<HookEventName>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
    #[serde(default)]
    pub tool_response: Option<Value>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stop_hook_active: Option<bool>,
    #[serde(default)]
    pub sound_hint: Option<String>,
}

/// Reads at most [`MAX_PAYLOAD_BYTES`] from `reader` and parses it as a
/// [`HookEvent`].
///
/// Reads one byte past the limit to distinguish "exactly at the limit"
/// from "truncated", then reports [`CoreError::PayloadTooLarge`] if the
/// source had more to give.
pub fn read_hook_event(mut reader: impl Read) -> Result<HookEvent> {
    let mut buf = Vec::with_capacity(4096);
    let mut limited = reader.by_ref().take(MAX_PAYLOAD_BYTES as u64 + 1);
    limited.read_to_end(&mut buf).map_err(CoreError::Read)?;

    if buf.len() > MAX_PAYLOAD_BYTES {
        return Err(CoreError::PayloadTooLarge {
            actual: buf.len(),
            max: MAX_PAYLOAD_BYTES,
        });
    }

    parse_hook_event(&buf)
}

/// Parses a raw JSON payload into a [`HookEvent`].
pub fn parse_hook_event(bytes: &[u8]) -> Result<HookEvent> {
    serde_json::from_slice(bytes).map_err(CoreError::InvalidJson)
}
