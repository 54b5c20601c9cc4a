//! Storage layer for Washbook.
//!
//! This module provides:
//! - The `KeyValueStore` trait and its file and in-memory backends
//! - The `PersistenceAdapter` that loads and saves the ledger blob and
//!   handles file export/import

mod adapter;
mod file;
mod memory;
mod traits;

pub use adapter::{LoadOutcome, PersistenceAdapter, LEDGER_KEY, UNREADABLE_KEY};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
