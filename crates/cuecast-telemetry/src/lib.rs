//! Optional SQLite sink recording sound resolution telemetry.
//!
//! Opening or writing to the database is never allowed to fail an
//! invocation: [`open_if_enabled`] swallows every error into a log line and
//! returns `None`, and the caller simply skips recording for that run.

mod error;
mod sink;

pub use error::{Result, TelemetryError};
pub use sink::{CandidateLookup, HookEventRecord, TelemetrySink, open_if_enabled};
