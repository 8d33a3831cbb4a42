//! Minimal `PATH` search, used by the backend factory to probe for
//! external audio player commands (`paplay`, `ffplay`, `aplay`, `afplay`).

use std::path::{Path, PathBuf};

/// Search `PATH` for an executable named `name`, returning the first match.
///
/// On Windows, also tries `name.exe` and `name.cmd` if the bare name isn't
/// found. Returns `None` if `PATH` is unset or no directory contains a
/// matching, executable file.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    find_in_dirs(std::env::split_paths(&path_var), name)
}

fn find_in_dirs(dirs: impl Iterator<Item = PathBuf>, name: &str) -> Option<PathBuf> {
    dirs.filter_map(|dir| candidate_in_dir(&dir, name)).next()
}

fn candidate_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let direct = dir.join(name);
    if is_executable_file(&direct) {
        return Some(direct);
    }

    #[cfg(target_os = "windows")]
    {
        for ext in ["exe", "cmd", "bat"] {
            let candidate = dir.join(format!("{name}.{ext}"));
            if is_executable_file(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
