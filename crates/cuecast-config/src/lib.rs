//! Layered configuration surface for cuecast.
//!
//! [`load`] assembles a [`Config`] from built-in defaults, an optional JSON
//! file, and `CUECAST_*` environment variables, in that priority order.
//! `cuecast-cli` applies CLI flags as a final layer on top of the result.

mod error;
mod loader;
mod model;

pub use error::{ConfigError, Result};
pub use loader::{default_config_path, load, load_from};
pub use model::{Config, FileLoggingConfig, LogLevel, SoundTrackingConfig, VALID_AUDIO_BACKENDS};
