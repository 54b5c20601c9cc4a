//! Core data types for the ledger.
//!
//! The serialized form of these types is the persisted layout and the
//! export/import file format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Whether an entry is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(LedgerError::Validation(format!(
                "Unknown entry type \"{}\" (use credit or debit)",
                other
            ))),
        }
    }
}

/// A single recorded transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Timestamp string; its first ten characters are the date key
    pub time: String,

    /// Vehicle or counterparty name
    pub name: String,

    /// Non-negative amount
    pub amount: f64,

    /// Free-form service description
    #[serde(default)]
    pub desc: String,

    /// Credit or debit
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(
        time: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        desc: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            time: time.into(),
            name: name.into(),
            amount,
            desc: desc.into(),
            kind,
        }
    }

    /// Produce the replacement for this entry; the timestamp is kept.
    pub fn updated(&self, update: &EntryUpdate) -> Self {
        Self {
            time: self.time.clone(),
            name: update.name.clone(),
            amount: update.amount,
            desc: update.desc.clone(),
            kind: update.kind,
        }
    }
}

/// The editable fields of an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryUpdate {
    pub name: String,
    pub amount: f64,
    pub desc: String,
    pub kind: EntryKind,
}

impl EntryUpdate {
    /// Start an update from the current values of `entry`.
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            amount: entry.amount,
            desc: entry.desc.clone(),
            kind: entry.kind,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Totals and entries for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub credit: f64,
    pub debit: f64,
    pub entries: Vec<Entry>,
}

impl DayRecord {
    /// Add an entry's contribution to the running totals.
    pub(crate) fn apply(&mut self, kind: EntryKind, amount: f64) {
        match kind {
            EntryKind::Credit => self.credit += amount,
            EntryKind::Debit => self.debit += amount,
        }
    }

    /// Remove an entry's contribution from the running totals.
    pub(crate) fn reverse(&mut self, kind: EntryKind, amount: f64) {
        match kind {
            EntryKind::Credit => self.credit -= amount,
            EntryKind::Debit => self.debit -= amount,
        }
    }

    /// Totals computed from scratch as `(credit, debit)`.
    pub fn recompute(&self) -> (f64, f64) {
        self.entries
            .iter()
            .fold((0.0, 0.0), |(credit, debit), entry| match entry.kind {
                EntryKind::Credit => (credit + entry.amount, debit),
                EntryKind::Debit => (credit, debit + entry.amount),
            })
    }

    /// Credit minus debit.
    pub fn net(&self) -> f64 {
        self.credit - self.debit
    }
}

/// Location of an entry: its day and position within that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub date_key: String,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serializes_with_type_field() {
        let entry = Entry::new("2024-05-01T10:00:00Z", "Corolla", 200.0, "wash", EntryKind::Credit);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "credit");
        assert_eq!(value["desc"], "wash");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_entry_desc_defaults_when_missing() {
        let entry: Entry = serde_json::from_str(
            r#"{"time":"2024-05-01T10:00:00Z","name":"Civic","amount":50,"type":"debit"}"#,
        )
        .unwrap();
        assert_eq!(entry.desc, "");
        assert_eq!(entry.kind, EntryKind::Debit);
        assert_eq!(entry.amount, 50.0);
    }

    #[test]
    fn test_entry_kind_from_str() {
        assert_eq!("Credit".parse::<EntryKind>().unwrap(), EntryKind::Credit);
        assert_eq!(" debit ".parse::<EntryKind>().unwrap(), EntryKind::Debit);
        assert!("refund".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_update_keeps_time() {
        let entry = Entry::new("2024-05-01T10:00:00Z", "Corolla", 200.0, "wash", EntryKind::Credit);
        let update = EntryUpdate::from_entry(&entry)
            .amount(300.0)
            .kind(EntryKind::Debit);
        let replaced = entry.updated(&update);
        assert_eq!(replaced.time, entry.time);
        assert_eq!(replaced.name, "Corolla");
        assert_eq!(replaced.amount, 300.0);
        assert_eq!(replaced.kind, EntryKind::Debit);
    }

    #[test]
    fn test_recompute_matches_entries() {
        let day = DayRecord {
            credit: 0.0,
            debit: 0.0,
            entries: vec![
                Entry::new("2024-05-01T10:00:00Z", "A", 10.0, "", EntryKind::Credit),
                Entry::new("2024-05-01T11:00:00Z", "B", 4.0, "", EntryKind::Debit),
                Entry::new("2024-05-01T12:00:00Z", "C", 5.0, "", EntryKind::Credit),
            ],
        };
        assert_eq!(day.recompute(), (15.0, 4.0));
    }
}
