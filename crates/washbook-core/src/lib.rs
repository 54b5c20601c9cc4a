//! # Washbook Core
//!
//! Core library for Washbook - a local bookkeeping tool for a small car-wash
//! business.
//!
//! This crate provides the ledger data model, its state transitions, the
//! ledger store with debounced persistence, and read-only history views,
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **ledger**: Entries, day records and the add/edit/delete transitions
//! - **store**: Owned ledger state, change notifications, debounced saves
//! - **storage**: Key-value backends and the persistence adapter
//! - **history**: Search, daily and monthly views

pub mod error;
pub mod fs;
pub mod history;
pub mod ledger;
pub mod storage;
pub mod store;

pub use error::{LedgerError, Result};
pub use ledger::{DayRecord, Entry, EntryKind, EntryRef, EntryUpdate, Ledger};
pub use store::{LedgerStore, StoreConfig};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
