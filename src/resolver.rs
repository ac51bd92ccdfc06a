//! Static file resolution
//!
//! Maps a requested filename to a path under the server's static root and
//! classifies the result. Stateless: nothing is cached between calls.

use std::fs;
use std::path::{Component, Path, PathBuf};

/// Outcome of resolving a requested filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A regular file, ready to stream
    File(PathBuf),

    /// Resolved path does not exist
    NotFound,

    /// Resolved path exists but is not a regular file
    NotAFile,
}

/// Resolve `filename` against the static root
///
/// The filename is joined onto the root and normalized lexically (`.` and
/// `..` segments folded away without touching the filesystem), then
/// classified by a metadata check. The normalized path is not re-validated
/// against the root, matching the behavior this server has always had.
pub fn resolve(root: &Path, filename: &str) -> Resolution {
    let path = normalize(&root.join(filename));
    tracing::debug!("Resolved file path: {}", path.display());

    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Resolution::File(path),
        Ok(_) => Resolution::NotAFile,
        Err(_) => Resolution::NotFound,
    }
}

/// Fold `.` and `..` components out of a path without hitting the
/// filesystem. `..` at the root is clamped there.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
