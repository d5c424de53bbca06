//! CLI for iatorrent.

use anyhow::Result;
use clap::Parser;
use iatorrent_core::config;
use iatorrent_core::layout::Layout;
use iatorrent_core::run::run_fetch;
use std::path::PathBuf;

/// Fetch the `<identifier>_archive.torrent` file for every row of a CSV.
#[derive(Debug, Parser)]
#[command(name = "iatorrent")]
#[command(about = "Download archive.org torrent files for identifiers listed in a CSV", long_about = None)]
pub struct Cli {
    /// Path to the CSV file [default: search.csv]. Its header must name an
    /// `identifier` column; the run aborts if it is missing rather than reading
    /// the first column.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Number of concurrent download workers [default: 10].
    #[arg(long, value_name = "N", value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// TOML file supplying defaults for `input` and `workers`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{}", e))?;
    if n == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(n)
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let cfg = config::load(self.config.as_deref())?.with_overrides(self.csv, self.workers);
        tracing::debug!("effective config: {:?}", cfg);
        run_fetch(&cfg, &Layout::default())
    }
}
