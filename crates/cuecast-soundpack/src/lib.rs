//! Soundpack path mapping and multi-extension resolution.
//!
//! [`path_mapper`] turns a logical path into candidate absolute paths for
//! either a directory tree or an explicit JSON map; [`resolver`] combines
//! that with a prioritized extension list to pick the first file that
//! actually exists; [`doc`] loads and validates the JSON soundpack format.

mod doc;
mod error;
mod path_mapper;
mod resolver;

pub use doc::{SoundpackDoc, load as load_doc};
pub use error::{Result, SoundpackError};
pub use path_mapper::{PathMapper, PathMapperKind};
pub use resolver::{DEFAULT_EXTENSIONS, Resolution, SoundpackResolver};
