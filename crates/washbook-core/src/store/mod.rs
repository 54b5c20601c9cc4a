//! The ledger store: single owner of the in-memory ledger.
//!
//! Every mutation produces a new immutable snapshot, publishes it to
//! subscribers and schedules a debounced save. Bulk replacement persists
//! immediately. Dropping the store cancels any save still waiting for its
//! quiet window, so one-shot callers should [`LedgerStore::flush`] first.

mod debounce;

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::sync::watch;

use self::debounce::SaveWorker;
use crate::error::Result;
use crate::ledger::{ledger_from_value, Entry, EntryKind, EntryRef, EntryUpdate, Ledger};
use crate::storage::PersistenceAdapter;

/// Default quiet period before a change is written.
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 1000;

/// Store tuning.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub save_debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS),
        }
    }
}

impl StoreConfig {
    pub fn with_debounce_ms(ms: u64) -> Self {
        Self {
            save_debounce: Duration::from_millis(ms),
        }
    }
}

/// Owns the ledger; mutation methods are the only write path.
pub struct LedgerStore {
    ledger: Arc<Ledger>,
    publisher: watch::Sender<Arc<Ledger>>,
    saver: SaveWorker,
    load_warning: Option<String>,
}

impl LedgerStore {
    /// Hydrate from persisted storage and start the save worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(adapter: PersistenceAdapter, config: StoreConfig) -> Self {
        let outcome = adapter.load();
        let ledger = Arc::new(outcome.ledger);
        let (publisher, _) = watch::channel(ledger.clone());
        Self {
            ledger,
            publisher,
            saver: SaveWorker::spawn(adapter, config.save_debounce),
            load_warning: outcome.warning,
        }
    }

    /// Warning from startup hydration, if stored data could not be used.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// The current ledger for read-only use.
    pub fn snapshot(&self) -> Arc<Ledger> {
        self.ledger.clone()
    }

    /// Receive every snapshot published after a mutation.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Ledger>> {
        self.publisher.subscribe()
    }

    /// Record a new entry on the day its timestamp falls on.
    pub fn add_entry(
        &mut self,
        timestamp: &str,
        name: &str,
        amount: f64,
        desc: &str,
        kind: EntryKind,
    ) -> Result<EntryRef> {
        let entry = Entry::new(timestamp, name, amount, desc, kind);
        let location = Arc::make_mut(&mut self.ledger).add_entry(entry)?;
        debug!(
            "added {} {} on {} #{}",
            kind, amount, location.date_key, location.index
        );
        self.publish_and_schedule();
        Ok(location)
    }

    /// Replace the entry at `(date_key, index)`; returns the previous entry.
    pub fn edit_entry(
        &mut self,
        date_key: &str,
        index: usize,
        update: &EntryUpdate,
    ) -> Result<Entry> {
        self.ledger.entry(date_key, index)?;
        let old = Arc::make_mut(&mut self.ledger).edit_entry(date_key, index, update)?;
        debug!("edited {} #{}", date_key, index);
        self.publish_and_schedule();
        Ok(old)
    }

    /// Remove the entry at `(date_key, index)`; returns the removed entry.
    ///
    /// Indices of later entries on the same day shift down by one.
    pub fn delete_entry(&mut self, date_key: &str, index: usize) -> Result<Entry> {
        self.ledger.entry(date_key, index)?;
        let removed = Arc::make_mut(&mut self.ledger).delete_entry(date_key, index)?;
        debug!("deleted {} #{}", date_key, index);
        self.publish_and_schedule();
        Ok(removed)
    }

    /// Replace the whole ledger with an externally supplied document.
    ///
    /// Malformed input is rejected with `LedgerError::Import` and leaves the
    /// store untouched. On success the new ledger is published and written
    /// immediately; a write failure is returned but the in-memory ledger is
    /// kept.
    pub async fn replace_all(&mut self, value: &serde_json::Value) -> Result<()> {
        let ledger = ledger_from_value(value)?;
        debug!("replacing ledger with {} imported days", ledger.len());
        self.ledger = Arc::new(ledger);
        self.publisher.send_replace(self.ledger.clone());
        self.saver.commit(self.ledger.clone()).await
    }

    /// Write any pending change now rather than after the quiet window.
    pub async fn flush(&self) -> Result<()> {
        self.saver.flush().await
    }

    /// Tear down the store, discarding any save still waiting to fire.
    pub fn shutdown(self) {
        debug!("ledger store shut down");
    }

    fn publish_and_schedule(&mut self) {
        self.publisher.send_replace(self.ledger.clone());
        self.saver.schedule(self.ledger.clone());
    }
}

impl std::fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerStore")
            .field("days", &self.ledger.len())
            .field("load_warning", &self.load_warning)
            .finish()
    }
}

