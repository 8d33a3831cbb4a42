//! Combines a [`PathMapper`] with a prioritized extension list to turn the
//! ordered candidates from `cuecast-core`'s sound mapper into one real file.

use std::path::PathBuf;

use cuecast_core::{LogicalPath, MappedSound};

use crate::path_mapper::PathMapper;

/// Extensions tried, in order, against each candidate base. Only the first
/// three have decoders in `cuecast-codec`; `ogg`/`aif` round out the list
/// for soundpacks distributed with those files even though they can't
/// currently be played.
pub const DEFAULT_EXTENSIONS: &[&str] = &["wav", "mp3", "aiff", "aif", "ogg"];

/// The outcome of resolving a [`MappedSound`] against a soundpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A file was found; `fallback_level` is the 1-6 priority rule (per
    /// the order documented on [`cuecast_core::map_sound`]) that produced
    /// the matching logical path, not its position in `all_paths`.
    Found {
        path: PathBuf,
        fallback_level: usize,
    },
    /// None of the candidate logical paths matched any extension.
    NotFound,
}

/// Resolves candidate logical paths against a soundpack's [`PathMapper`],
/// trying each supported extension in priority order before moving to the
/// next candidate base.
pub struct SoundpackResolver<'a> {
    mapper: &'a PathMapper,
    extensions: &'a [&'a str],
}

impl<'a> SoundpackResolver<'a> {
    pub fn new(mapper: &'a PathMapper) -> Self {
        Self {
            mapper,
            extensions: DEFAULT_EXTENSIONS,
        }
    }

    pub fn with_extensions(mapper: &'a PathMapper, extensions: &'a [&'a str]) -> Self {
        Self { mapper, extensions }
    }

    /// Tries every candidate in `mapped.all_paths`, in order, returning the
    /// first file that exists on disk.
    pub fn resolve(&self, mapped: &MappedSound) -> Resolution {
        for (index, logical) in mapped.all_paths.iter().enumerate() {
            if let Some(path) = self.resolve_one(logical) {
                return Resolution::Found {
                    path,
                    fallback_level: mapped.rule_numbers[index],
                };
            }
        }
        Resolution::NotFound
    }

    fn resolve_one(&self, logical: &LogicalPath) -> Option<PathBuf> {
        for base in self.mapper.map_path(logical) {
            if base.is_file() {
                // A JSON mapper's target is already a concrete file with
                // its real extension; a directory mapper's is an
                // extension-less stem that still needs probing below.
                return Some(base);
            }
            for ext in self.extensions {
                let candidate = base.with_extension(ext);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}
