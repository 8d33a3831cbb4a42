//! Hook event parsing and sound-mapping: the pure, filesystem-free half of
//! the cuecast pipeline.
//!
//! [`event::read_hook_event`] turns a bounded stdin stream into a
//! [`event::HookEvent`]; [`context::classify`] derives an [`context::EventContext`]
//! from it; [`mapper::map_sound`] turns that context into an ordered list of
//! [`logical_path::LogicalPath`] candidates for `cuecast-soundpack` to resolve
//! against a real soundpack.

mod context;
mod error;
mod event;
mod logical_path;
mod mapper;
mod slug;

pub use context::{Category, EventContext, classify};
pub use error::{CoreError, Result};
pub use event::{HookEvent, HookEventName, MAX_PAYLOAD_BYTES, parse_hook_event, read_hook_event};
pub use logical_path::LogicalPath;
pub use mapper::{MappedSound, map_sound};
pub use slug::slugify;
