//! Logging init: the informational sink is standard output.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Initialize timestamped, line-per-event logging to stdout.
///
/// `RUST_LOG` overrides the default `info` filter. The fmt subscriber formats each
/// event into one buffer before writing, so lines from concurrent workers never
/// interleave.
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
