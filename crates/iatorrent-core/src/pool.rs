//! Pool coordinator: one producer, N workers, one rendezvous channel, one join.

use anyhow::{Context, Result};
use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use crate::dispatch;
use crate::failure_log::FailureLog;
use crate::layout::Layout;
use crate::worker;

/// Run the fan-out/fan-in pipeline over `records` (header already consumed).
///
/// Starts `workers` worker threads (at least one) and a dispatcher thread, then
/// blocks until all of them have returned. The channel has no buffer: the
/// dispatcher waits on every send until some worker is ready to take the item.
pub fn run_pool<R, W>(
    records: csv::Reader<R>,
    column: usize,
    workers: usize,
    layout: &Layout,
    failures: &FailureLog<W>,
) -> Result<()>
where
    R: io::Read + Send,
    W: io::Write + Send,
{
    let workers = workers.max(1);
    let (tx, rx) = mpsc::sync_channel::<String>(0);
    let queue = Mutex::new(rx);

    thread::scope(|s| -> Result<()> {
        for n in 0..workers {
            let queue = &queue;
            thread::Builder::new()
                .name(format!("worker-{}", n))
                .spawn_scoped(s, move || worker::run_worker(n, queue, layout, failures))
                .with_context(|| format!("failed to spawn worker {}", n))?;
        }
        // On a spawn error above, `tx` is dropped here and the started workers exit.
        thread::Builder::new()
            .name("dispatcher".to_string())
            .spawn_scoped(s, move || dispatch::dispatch(records, column, tx))
            .context("failed to spawn dispatcher")?;
        tracing::debug!("started {} workers", workers);
        Ok(())
    })?;

    tracing::debug!("all workers finished");
    Ok(())
}
