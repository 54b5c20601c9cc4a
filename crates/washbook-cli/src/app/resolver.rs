//! Path resolution for the config file and data directory.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_data_dir, read_config, WashbookConfig};

/// Resolve the config file path, checking WASHBOOK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("WASHBOOK_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when there is none.
pub fn load_config() -> anyhow::Result<WashbookConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(WashbookConfig::default());
    }
    log::debug!("reading config {}", path.display());
    read_config(&path)
}

/// Resolve the data directory: `--data-dir` (or its env var), then config,
/// then the XDG data directory.
pub fn resolve_data_dir(cli: &Cli, config: &WashbookConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = cli.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = config.storage.data_dir.as_deref() {
        return Ok(expand_home(dir));
    }
    default_data_dir()
}

/// Resolve where an export is written when no path is given.
pub fn default_export_path(data_dir: &Path, config: &WashbookConfig) -> PathBuf {
    data_dir.join(&config.export.file_name)
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
