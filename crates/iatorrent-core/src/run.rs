//! Setup and teardown around the worker pool.
//!
//! Every step here is fatal on error: nothing has been downloaded yet when it fails.

use anyhow::{Context, Result};
use std::fs::{self, File};

use crate::config::FetchConfig;
use crate::dispatch;
use crate::failure_log::FailureLog;
use crate::layout::Layout;
use crate::pool;

/// Create the output directory, open the input and failure log, read the header,
/// run the pool to completion, then flush the failure log exactly once.
pub fn run_fetch(cfg: &FetchConfig, layout: &Layout) -> Result<()> {
    cfg.validate()?;

    fs::create_dir_all(&layout.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            layout.output_dir.display()
        )
    })?;

    let input = File::open(&cfg.input)
        .with_context(|| format!("failed to open CSV file {}", cfg.input.display()))?;

    let failures = FailureLog::create(&layout.failure_log)?;

    let mut records = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    let headers = records.headers().context("failed to read CSV header")?;
    let column = dispatch::identifier_column(headers)?;

    tracing::debug!(
        input = %cfg.input.display(),
        workers = cfg.workers,
        column,
        "starting fetch"
    );
    pool::run_pool(records, column, cfg.workers, layout, &failures)?;

    failures
        .finish()
        .with_context(|| format!("failed to flush {}", layout.failure_log.display()))?;
    Ok(())
}
