//! Blocking single-GET fetcher: one curl easy handle per download.
//!
//! The destination is created only once a `200 OK` body starts arriving, so a
//! transport failure or bad status never touches the filesystem. If the body
//! stream breaks after the file was opened, the partial file is removed.

mod error;
mod status;

pub use error::{FetchError, WriteCause};
pub use status::StatusLine;

use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Redirect hop limit; archive.org sends one hop to a storage node.
const MAX_REDIRECTIONS: u32 = 10;

/// Where the response body is going, advanced from the curl write callback.
enum BodySink {
    /// No body bytes seen yet.
    Pending,
    /// 200 OK; streaming into the destination.
    Writing(File),
    /// Non-200 final response; transfer aborted, body discarded.
    Rejected,
    /// Creating or writing the destination failed; transfer aborted.
    Failed(io::Error),
}

impl BodySink {
    /// Returns the number of bytes consumed; anything short of `data.len()` aborts the transfer.
    fn accept(&mut self, data: &[u8], status: Option<&StatusLine>, dest: &Path) -> usize {
        if let BodySink::Pending = self {
            *self = match status {
                Some(s) if s.is_ok() => match File::create(dest) {
                    Ok(file) => BodySink::Writing(file),
                    Err(e) => BodySink::Failed(e),
                },
                _ => BodySink::Rejected,
            };
        }
        match self {
            BodySink::Writing(file) => {
                if let Err(e) = file.write_all(data) {
                    *self = BodySink::Failed(e);
                    return 0;
                }
                data.len()
            }
            _ => 0,
        }
    }
}

/// GET `url` and store the body at `dest`. The parent directory must already exist.
///
/// No timeout and no retry: a hung server blocks this call (and only this call).
pub fn download_file(url: &str, dest: &Path) -> Result<(), FetchError> {
    let status: RefCell<Option<StatusLine>> = RefCell::new(None);
    let body = RefCell::new(BodySink::Pending);

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Transport)?;
    easy.follow_location(true).map_err(FetchError::Transport)?;
    easy.max_redirections(MAX_REDIRECTIONS)
        .map_err(FetchError::Transport)?;

    let performed = {
        let mut transfer = easy.transfer();
        // Redirect hops each send a status line; the last one seen before the body wins.
        transfer
            .header_function(|line| {
                if let Some(parsed) = StatusLine::parse(line) {
                    *status.borrow_mut() = Some(parsed);
                }
                true
            })
            .map_err(FetchError::Transport)?;
        transfer
            .write_function(|data| {
                let status = status.borrow();
                Ok(body.borrow_mut().accept(data, status.as_ref(), dest))
            })
            .map_err(FetchError::Transport)?;
        transfer.perform()
    };

    let last_status = status.into_inner();
    match (performed, body.into_inner()) {
        (_, BodySink::Failed(e)) => {
            discard_partial(dest);
            Err(FetchError::Write(WriteCause::Io(e)))
        }
        (Err(e), BodySink::Writing(file)) => {
            drop(file);
            discard_partial(dest);
            Err(FetchError::Write(WriteCause::Stream(e)))
        }
        (Ok(()), BodySink::Writing(_)) => Ok(()),
        (_, BodySink::Rejected) => Err(FetchError::BadStatus(final_status(&mut easy, last_status))),
        // A final 200 arrived but the body broke off before its first byte; no file was opened.
        (Err(e), BodySink::Pending) if last_status.as_ref().is_some_and(StatusLine::is_ok) => {
            Err(FetchError::Write(WriteCause::Stream(e)))
        }
        (Err(e), BodySink::Pending) => Err(FetchError::Transport(e)),
        (Ok(()), BodySink::Pending) => {
            // Empty body: the write callback never ran.
            let status = final_status(&mut easy, last_status);
            if !status.is_ok() {
                return Err(FetchError::BadStatus(status));
            }
            File::create(dest).map_err(|e| FetchError::Write(WriteCause::Io(e)))?;
            Ok(())
        }
    }
}

fn final_status(easy: &mut curl::easy::Easy, seen: Option<StatusLine>) -> StatusLine {
    seen.unwrap_or_else(|| StatusLine::new(easy.response_code().unwrap_or(0), ""))
}

/// Best-effort removal of a partially written destination. A failure here is not
/// reported to the caller; it is only visible at debug level.
fn discard_partial(dest: &Path) {
    if let Err(e) = fs::remove_file(dest) {
        tracing::debug!("could not remove partial file {}: {}", dest.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_rejects_non_ok_without_creating_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a_archive.torrent");
        let mut sink = BodySink::Pending;
        let status = StatusLine::new(404, "Not Found");
        assert_eq!(sink.accept(b"not found", Some(&status), &dest), 0);
        assert!(matches!(sink, BodySink::Rejected));
        assert!(!dest.exists());
    }

    #[test]
    fn sink_writes_ok_body() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("b_archive.torrent");
        let mut sink = BodySink::Pending;
        let status = StatusLine::new(200, "OK");
        assert_eq!(sink.accept(b"TORRENT", Some(&status), &dest), 7);
        assert_eq!(sink.accept(b"DATA", Some(&status), &dest), 4);
        drop(sink);
        assert_eq!(fs::read(&dest).unwrap(), b"TORRENTDATA");
    }

    #[test]
    fn sink_without_status_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("c_archive.torrent");
        let mut sink = BodySink::Pending;
        assert_eq!(sink.accept(b"x", None, &dest), 0);
        assert!(matches!(sink, BodySink::Rejected));
    }

    #[test]
    fn sink_create_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing-dir").join("d_archive.torrent");
        let mut sink = BodySink::Pending;
        let status = StatusLine::new(200, "OK");
        assert_eq!(sink.accept(b"x", Some(&status), &dest), 0);
        assert!(matches!(sink, BodySink::Failed(_)));
    }

    #[test]
    fn discard_partial_ignores_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        discard_partial(&dir.path().join("never-created"));
    }
}
