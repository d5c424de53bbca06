//! Producer side of the pipeline: CSV records in, identifiers onto the work channel.

use anyhow::Result;
use std::io;
use std::sync::mpsc::SyncSender;

/// Header name of the column holding archive.org identifiers.
pub const IDENTIFIER_COLUMN: &str = "identifier";

/// Index of the `identifier` column in `headers` (first match wins).
pub fn identifier_column(headers: &csv::StringRecord) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == IDENTIFIER_COLUMN)
        .ok_or_else(|| anyhow::anyhow!("CSV header has no `{}` column", IDENTIFIER_COLUMN))
}

/// Stream records in file order and push each identifier onto `queue`.
///
/// Each send blocks until a worker takes the item. Malformed rows are logged
/// and skipped; empty rows are skipped silently. Returning drops `queue`, which
/// is the only end-of-work signal the workers get.
pub fn dispatch<R: io::Read>(mut records: csv::Reader<R>, column: usize, queue: SyncSender<String>) {
    let mut record = csv::StringRecord::new();
    loop {
        match records.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => {
                // The underlying reader is broken; retrying would repeat the same error.
                tracing::warn!("failed to read input, stopping dispatch: {}", e);
                break;
            }
            Err(e) => {
                tracing::warn!("failed to read CSV record: {}", e);
                continue;
            }
        }
        if record.is_empty() {
            continue;
        }
        let Some(identifier) = record.get(column) else {
            tracing::warn!(
                "CSV record at line {} has no field {}, skipping",
                record.position().map(|p| p.line()).unwrap_or(0),
                column
            );
            continue;
        };
        if queue.send(identifier.to_string()).is_err() {
            // Every worker is gone; nothing left to hand work to.
            tracing::warn!("work queue closed before input was exhausted");
            break;
        }
    }
    tracing::debug!("input exhausted, closing work queue");
}
