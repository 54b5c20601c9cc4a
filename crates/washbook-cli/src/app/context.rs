//! Application context for the Washbook CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file so handlers
//! can open the ledger store without threading paths around.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use washbook_core::storage::{FileKeyValueStore, PersistenceAdapter};
use washbook_core::{LedgerStore, StoreConfig};

use crate::cli::Cli;
use crate::config::WashbookConfig;
use crate::ui::{print_warning, UiContext};

use super::resolver::{load_config, resolve_data_dir};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<WashbookConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it on first use.
    pub fn config(&self) -> anyhow::Result<&WashbookConfig> {
        self.config.get_or_try_init(load_config)
    }

    /// Resolve the directory that holds the ledger.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli, self.config()?)
    }

    /// Build a UI context honoring the global `--json` flag.
    pub fn ui_context(&self) -> UiContext {
        UiContext::from_env(self.cli.json)
    }

    /// Persistence adapter over the file store in the data directory.
    pub fn adapter(&self) -> anyhow::Result<PersistenceAdapter> {
        let dir = self.data_dir()?;
        log::debug!("using data directory {}", dir.display());
        Ok(PersistenceAdapter::new(Arc::new(FileKeyValueStore::new(
            dir,
        ))))
    }

    /// Open the ledger store, reporting any hydration warning on stderr.
    pub fn open_store(&self) -> anyhow::Result<LedgerStore> {
        let config = StoreConfig::with_debounce_ms(self.config()?.store.save_debounce_ms);
        let store = LedgerStore::open(self.adapter()?, config);
        if let Some(warning) = store.load_warning() {
            print_warning(&self.ui_context(), warning);
        }
        Ok(store)
    }
}
