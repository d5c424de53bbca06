//! Consumer side: pull identifiers until the queue closes, fetch each one.

use std::io::Write;
use std::sync::mpsc::Receiver;
use std::sync::{Mutex, PoisonError};

use crate::exists;
use crate::failure_log::FailureLog;
use crate::fetch;
use crate::layout::Layout;

/// What happened to one identifier. Only logged, never aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Destination already existed as a regular file; no request was made.
    Skipped,
    /// Destination now holds the response body.
    Downloaded,
    /// Fetch failed; one line was written to the failure log.
    Failed,
}

/// Handle a single identifier end to end.
pub fn process_identifier<W: Write + Send>(
    identifier: &str,
    layout: &Layout,
    failures: &FailureLog<W>,
) -> Outcome {
    let target = layout.target(identifier);

    if exists::is_regular_file(&target.path) {
        tracing::info!(
            "file {} already exists, skipping download",
            target.path.display()
        );
        return Outcome::Skipped;
    }

    tracing::info!("downloading {}", target.path.display());
    match fetch::download_file(&target.url, &target.path) {
        Ok(()) => Outcome::Downloaded,
        Err(e) => {
            failures.record(&target.url, &e);
            Outcome::Failed
        }
    }
}

/// Worker loop. The receiver is shared; holding the lock only for the `recv`
/// gives each item to exactly one worker. Returns once the queue is closed and drained.
pub fn run_worker<W: Write + Send>(
    id: usize,
    queue: &Mutex<Receiver<String>>,
    layout: &Layout,
    failures: &FailureLog<W>,
) {
    loop {
        let next = queue.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(identifier) = next else {
            break;
        };
        process_identifier(&identifier, layout, failures);
    }
    tracing::debug!(worker = id, "work queue drained, worker exiting");
}
