use std::fs;
use std::path::Path;

/// True iff `path` names a regular file (symlinks are followed).
///
/// A missing path, a directory, or any metadata error (permissions, I/O) all
/// count as "not a regular file", so the caller simply attempts the download.
pub fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
