//! Platform detection and filesystem conventions for cuecast.
//!
//! This crate provides the leaf utilities the rest of cuecast builds on:
//!
//! - **WSL detection**: [`is_wsl`] — used by the backend factory to prefer
//!   an external command player over the native audio stack.
//! - **PATH lookup**: [`find_on_path`] — locates an external player binary.
//! - **XDG directories**: [`config_dir`], [`cache_dir`], [`data_dir`] — resolved
//!   via [`dirs`] with a fixed application name.

mod paths;
mod which;
mod wsl;

pub use paths::{APP_NAME, cache_dir, config_dir, data_dir};
pub use which::find_on_path;
pub use wsl::is_wsl;
