//! Where each identifier is fetched from and written to.

use std::path::PathBuf;

/// Archive.org download endpoint; items live under `<base>/<identifier>/`.
pub const DEFAULT_BASE_URL: &str = "https://archive.org/download";
/// Output directory for fetched torrents, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "torrents";
/// Failure log, relative to the working directory.
pub const DEFAULT_FAILURE_LOG: &str = "failed_downloads.log";
/// Suffix of the torrent file archive.org generates for every item.
pub const TORRENT_SUFFIX: &str = "_archive.torrent";

/// Fixed locations used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub failure_log: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            failure_log: PathBuf::from(DEFAULT_FAILURE_LOG),
        }
    }
}

/// URL and destination path derived from one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf,
}

impl Layout {
    /// Derive the download target for `identifier`. The identifier is used as-is
    /// in both the URL path segment and the file name.
    pub fn target(&self, identifier: &str) -> DownloadTarget {
        let file_name = format!("{}{}", identifier, TORRENT_SUFFIX);
        DownloadTarget {
            url: format!(
                "{}/{}/{}",
                self.base_url.trim_end_matches('/'),
                identifier,
                file_name
            ),
            path: self.output_dir.join(file_name),
        }
    }
}
