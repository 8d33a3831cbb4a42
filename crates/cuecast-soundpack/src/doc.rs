//! Loading and validating explicit JSON soundpack documents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SoundpackError};
use crate::path_mapper::PathMapper;

/// The on-disk shape of a JSON soundpack: `{name, description?, version?, mappings}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundpackDoc {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub mappings: HashMap<String, PathBuf>,
}

/// Loads a [`SoundpackDoc`] from `path`, validating that it has a `default`
/// entry and that every mapped file exists, then builds a [`PathMapper`].
///
/// Relative mapping targets are resolved against the document's own
/// directory, matching how a soundpack is normally distributed as a
/// directory containing both the manifest and its sound files.
pub fn load(path: &Path) -> Result<PathMapper> {
    let raw = std::fs::read_to_string(path).map_err(|source| SoundpackError::ReadDoc {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: SoundpackDoc =
        serde_json::from_str(&raw).map_err(|source| SoundpackError::ParseDoc {
            path: path.to_path_buf(),
            source,
        })?;

    if doc.name.is_empty() {
        return Err(SoundpackError::EmptyName {
            path: path.to_path_buf(),
        });
    }

    if !doc.mappings.contains_key("default") {
        return Err(SoundpackError::MissingDefault { pack: doc.name });
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut resolved = HashMap::with_capacity(doc.mappings.len());
    for (logical, target) in doc.mappings {
        let absolute = if target.is_absolute() {
            target
        } else {
            base_dir.join(&target)
        };
        if !absolute.is_file() {
            return Err(SoundpackError::MissingMappedFile {
                pack: doc.name.clone(),
                logical,
                target: absolute,
            });
        }
        resolved.insert(logical, absolute);
    }

    Ok(PathMapper::json(doc.name, resolved))
}
