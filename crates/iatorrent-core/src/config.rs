use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default CSV input, relative to the working directory.
pub const DEFAULT_INPUT: &str = "search.csv";
/// Default number of concurrent download workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Run configuration: which CSV to read and how many workers to start.
///
/// Built once at startup (file defaults, then CLI overrides) and passed down
/// explicitly; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Path to the CSV file; must have an `identifier` column.
    pub input: PathBuf,
    /// Number of concurrent download workers.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl FetchConfig {
    /// Apply command-line overrides on top of file/default values.
    pub fn with_overrides(mut self, input: Option<PathBuf>, workers: Option<usize>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(workers) = workers {
            self.workers = workers;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            anyhow::bail!("worker count must be at least 1");
        }
        Ok(())
    }
}

/// Location of the optional user config file, if one exists.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("iatorrent")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Parse a config file. Missing keys fall back to defaults.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration: an explicit path must exist; otherwise the XDG config file
/// is used when present and built-in defaults when not. Never writes to disk.
pub fn load(explicit: Option<&Path>) -> Result<FetchConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match find_config_file()? {
        Some(path) => {
            tracing::debug!("using config file {}", path.display());
            load_from_path(&path)
        }
        None => Ok(FetchConfig::default()),
    }
}
