//! Backend-abstracted audio playback.
//!
//! [`factory::build_backend`] picks between [`native::NativeBackend`] (cpal)
//! and [`command::CommandBackend`] (an external player process) based on
//! configuration and platform probing; both implement the common
//! [`backend::AudioBackend`] trait so the orchestrator never needs to know
//! which one it got.

mod backend;
mod cancellation;
mod command;
mod error;
mod factory;
mod native;
mod source;

pub use backend::AudioBackend;
pub use cancellation::CancellationToken;
pub use error::{AudioError, Result};
pub use factory::{BackendKind, COMMAND_CANDIDATES, build_backend};
pub use source::AudioSource;
