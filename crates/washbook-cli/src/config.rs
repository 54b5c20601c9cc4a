use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use washbook_core::store::DEFAULT_SAVE_DEBOUNCE_MS;

/// Default file name for exports written to the data directory.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "car-wash-backup.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WashbookConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            save_debounce_ms: default_save_debounce_ms(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
    /// Program run with the exported file path as its only argument
    pub share_command: Option<String>,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
            share_command: None,
        }
    }
}

fn default_save_debounce_ms() -> u64 {
    DEFAULT_SAVE_DEBOUNCE_MS
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<WashbookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("washbook"));
        }
    }
    Ok(home_dir()?.join(".config").join("washbook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("washbook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("washbook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
