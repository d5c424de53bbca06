//! Per-download error type. Never fatal to the run; the worker logs it and moves on.

use super::status::StatusLine;
use std::io;

/// Why a single download failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, ...). Nothing was written.
    #[error("failed to download file: {0}")]
    Transport(#[source] curl::Error),
    /// The final response was not `200 OK`. Nothing was written.
    #[error("bad status: {0}")]
    BadStatus(StatusLine),
    /// Creating or filling the destination failed; the partial file was removed (best effort).
    #[error("failed to save file: {0}")]
    Write(#[source] WriteCause),
}

/// Underlying cause of a [`FetchError::Write`].
#[derive(Debug, thiserror::Error)]
pub enum WriteCause {
    /// Local file create or write failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The body stream broke off after the file was opened.
    #[error(transparent)]
    Stream(#[from] curl::Error),
}
