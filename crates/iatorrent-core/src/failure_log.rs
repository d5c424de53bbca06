//! Failure sink: one timestamped line per failed download, buffered and flushed once.

use anyhow::{Context, Result};
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Shared, line-atomic failure log. Workers call [`FailureLog::record`] concurrently;
/// the owner calls [`FailureLog::finish`] after every worker has returned.
pub struct FailureLog<W: Write + Send> {
    out: Mutex<BufWriter<W>>,
}

impl FailureLog<File> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write + Send> FailureLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            out: Mutex::new(BufWriter::new(writer)),
        }
    }

    /// Append `<timestamp> Failed to download <url>: <error>`.
    pub fn record(&self, url: &str, error: &dyn Display) {
        let line = format!(
            "{} Failed to download {}: {}\n",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            url,
            error
        );
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = out.write_all(line.as_bytes()) {
            tracing::warn!("could not write failure log entry for {}: {}", url, e);
        }
    }

    /// Flush buffered lines and hand back the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        let out = self.out.into_inner().unwrap_or_else(PoisonError::into_inner);
        out.into_inner().map_err(|e| e.into_error())
    }
}
