//! Persistence adapter: the serialized ledger in local storage, plus file
//! export and import.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use super::traits::KeyValueStore;
use crate::error::{LedgerError, Result};
use crate::fs::write_atomic;
use crate::ledger::{ledger_from_value, Ledger};

/// Storage key holding the serialized ledger.
pub const LEDGER_KEY: &str = "Year";

/// Where an unreadable blob is set aside before the ledger starts empty.
pub const UNREADABLE_KEY: &str = "Year-unreadable";

/// Result of hydrating the ledger at startup.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    /// Set when stored data existed but could not be used
    pub warning: Option<String>,
}

/// Reads and writes the ledger blob through a [`KeyValueStore`].
#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted ledger, falling back to an empty one.
    ///
    /// Never fails: read and parse errors are logged and returned as a
    /// warning. The blob goes through the same shape checks as an import, so
    /// empty days and malformed date keys make it unreadable too. An
    /// unreadable blob is copied to [`UNREADABLE_KEY`] so a later save cannot
    /// destroy it.
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(LEDGER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted ledger, starting empty");
                return LoadOutcome::default();
            }
            Err(err) => {
                warn!("failed to read stored ledger: {}", err);
                return LoadOutcome {
                    ledger: Ledger::new(),
                    warning: Some(format!("Failed to load stored data: {}", err)),
                };
            }
        };

        let parsed = serde_json::from_str::<serde_json::Value>(&raw)
            .map_err(LedgerError::from)
            .and_then(|value| ledger_from_value(&value));
        match parsed {
            Ok(ledger) => {
                debug!("loaded ledger with {} days", ledger.len());
                LoadOutcome {
                    ledger,
                    warning: None,
                }
            }
            Err(err) => {
                warn!("stored ledger is unreadable: {}", err);
                let mut warning = format!("Failed to load stored data: {}", err);
                match self.store.set(UNREADABLE_KEY, &raw) {
                    Ok(()) => warning.push_str(&format!(
                        " (original kept under \"{}\")",
                        UNREADABLE_KEY
                    )),
                    Err(set_err) => warn!("could not preserve unreadable ledger: {}", set_err),
                }
                LoadOutcome {
                    ledger: Ledger::new(),
                    warning: Some(warning),
                }
            }
        }
    }

    /// Serialize the ledger and write it under [`LEDGER_KEY`].
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let json = serde_json::to_string(ledger)
            .map_err(|e| LedgerError::Persistence(format!("Failed to serialize ledger: {}", e)))?;
        self.store.set(LEDGER_KEY, &json)?;
        debug!("saved ledger ({} days, {} bytes)", ledger.len(), json.len());
        Ok(())
    }

    /// The persisted blob exactly as stored, if any.
    pub fn persisted_json(&self) -> Result<Option<String>> {
        self.store.get(LEDGER_KEY)
    }

    /// Copy the persisted ledger to `path`, returning the bytes written.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Export` when nothing has been persisted yet or the
    /// file cannot be written.
    pub fn export_to_file(&self, path: &Path) -> Result<u64> {
        let json = self
            .persisted_json()?
            .ok_or_else(|| LedgerError::Export("No data to export".to_string()))?;
        write_atomic(path, json.as_bytes()).map_err(|e| {
            LedgerError::Export(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Read and parse an import file. Nothing is mutated here; the caller
    /// hands the value to the store's `replace_all`.
    pub fn import_from_file(path: &Path) -> Result<serde_json::Value> {
        let contents = fs::read_to_string(path).map_err(|e| {
            LedgerError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Import(format!("{} is not valid JSON: {}", path.display(), e))
        })
    }
}
