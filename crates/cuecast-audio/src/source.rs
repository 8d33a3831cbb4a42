//! The two shapes audio can arrive in for playback.

use std::path::PathBuf;

/// Where the bytes a backend plays come from.
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// An absolute path to a file a backend may read directly.
    FilePath(PathBuf),
    /// In-memory bytes plus a format hint (the file extension the bytes
    /// would have had), for backends that only accept file paths.
    Reader { bytes: Vec<u8>, format_hint: String },
}

impl AudioSource {
    /// A short label naming the logical filename for this source, used for
    /// extension-based format dispatch and temp-file naming.
    pub fn filename_hint(&self) -> String {
        match self {
            AudioSource::FilePath(path) => path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("sound")
                .to_string(),
            AudioSource::Reader { format_hint, .. } => format!("sound.{format_hint}"),
        }
    }
}
