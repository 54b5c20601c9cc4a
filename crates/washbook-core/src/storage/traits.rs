//! Key-value storage trait definition.
//!
//! The `KeyValueStore` trait is the seam between the persistence adapter and
//! whatever local storage holds the serialized ledger. Values are opaque
//! strings; the adapter owns the JSON encoding.

use crate::error::Result;

/// Local key-value storage for serialized blobs.
///
/// Implementations must ensure:
/// - A `set` either fully replaces the value or leaves the old one intact
/// - `get` of a key never written returns `Ok(None)`
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Persistence` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Persistence` if the write fails, or
    /// `LedgerError::Validation` if the key is not usable by the backend.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
