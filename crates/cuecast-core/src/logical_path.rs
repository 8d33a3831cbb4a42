//! The extension-less, category-scoped path that identifies a candidate
//! sound before the soundpack resolver turns it into a real file.

use std::fmt;

/// A relative sound path of the form `<category>/<name>` or `default`,
/// with no file extension. The resolver applies extensions in priority
/// order when probing the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Builds `<category>/<name>`, both already expected to be slugs.
    pub fn scoped(category: &str, name: &str) -> Self {
        Self(format!("{category}/{name}"))
    }

    /// The `default` path used when nothing more specific matches.
    pub fn default_path() -> Self {
        Self("default".to_string())
    }

    /// The extension-less relative path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
