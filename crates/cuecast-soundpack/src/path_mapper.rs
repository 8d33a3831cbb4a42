//! Maps a [`LogicalPath`] to zero or more candidate absolute paths,
//! without touching the filesystem.

use std::collections::HashMap;
use std::path::PathBuf;

use cuecast_core::LogicalPath;

/// Identifies which kind of [`PathMapper`] produced a set of candidates,
/// reported alongside the mapper's name for logging and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMapperKind {
    Directory,
    Json,
}

impl PathMapperKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PathMapperKind::Directory => "directory",
            PathMapperKind::Json => "json",
        }
    }
}

/// A soundpack's strategy for turning logical paths into candidate files.
#[derive(Debug, Clone)]
pub enum PathMapper {
    /// An ordered list of base directories, searched in priority order.
    Directory { name: String, bases: Vec<PathBuf> },
    /// An explicit map from extension-less logical path to absolute file.
    Json {
        name: String,
        mappings: HashMap<String, PathBuf>,
    },
}

impl PathMapper {
    /// Builds a directory-backed mapper from an ordered list of base dirs.
    pub fn directory(name: impl Into<String>, bases: Vec<PathBuf>) -> Self {
        PathMapper::Directory {
            name: name.into(),
            bases,
        }
    }

    /// Builds a JSON-backed mapper from an explicit logical-path map.
    pub fn json(name: impl Into<String>, mappings: HashMap<String, PathBuf>) -> Self {
        PathMapper::Json {
            name: name.into(),
            mappings,
        }
    }

    /// The soundpack's display name.
    pub fn name(&self) -> &str {
        match self {
            PathMapper::Directory { name, .. } | PathMapper::Json { name, .. } => name,
        }
    }

    /// Whether this is a [`PathMapperKind::Directory`] or `::Json` mapper.
    pub fn kind(&self) -> PathMapperKind {
        match self {
            PathMapper::Directory { .. } => PathMapperKind::Directory,
            PathMapper::Json { .. } => PathMapperKind::Json,
        }
    }

    /// Returns the candidate (extension-less for directory mappers,
    /// already-absolute-with-extension for JSON mappers) paths for
    /// `logical`, in priority order.
    pub fn map_path(&self, logical: &LogicalPath) -> Vec<PathBuf> {
        match self {
            PathMapper::Directory { bases, .. } => {
                bases.iter().map(|base| base.join(logical.as_str())).collect()
            }
            PathMapper::Json { mappings, .. } => mappings
                .get(logical.as_str())
                .cloned()
                .into_iter()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_mapper_joins_each_base_in_order() {
        let mapper = PathMapper::directory(
            "layered",
            vec![PathBuf::from("/a"), PathBuf::from("/b")],
        );
        let candidates = mapper.map_path(&LogicalPath::scoped("success", "bash"));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/a/success/bash"),
                PathBuf::from("/b/success/bash"),
            ]
        );
        assert_eq!(mapper.kind(), PathMapperKind::Directory);
        assert_eq!(mapper.kind().as_str(), "directory");
    }

    #[test]
    fn json_mapper_returns_single_match_or_empty() {
        let mut mappings = HashMap::new();
        mappings.insert(
            "success/bash".to_string(),
            PathBuf::from("/packs/a/success-bash.wav"),
        );
        let mapper = PathMapper::json("explicit", mappings);

        let hit = mapper.map_path(&LogicalPath::scoped("success", "bash"));
        assert_eq!(hit, vec![PathBuf::from("/packs/a/success-bash.wav")]);

        let miss = mapper.map_path(&LogicalPath::scoped("error", "bash"));
        assert!(miss.is_empty());
        assert_eq!(mapper.kind(), PathMapperKind::Json);
    }

    #[test]
    fn mapper_reports_its_name() {
        let mapper = PathMapper::directory("layered", vec![]);
        assert_eq!(mapper.name(), "layered");
    }
}
