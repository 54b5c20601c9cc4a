//! The ledger: a mapping from date key to day record.
//!
//! All state transitions live here as plain methods on [`Ledger`]. Each
//! operation checks its preconditions before touching any state, so a failed
//! call leaves the ledger exactly as it was.

mod keys;
mod types;
mod validation;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use keys::{date_key, is_date_key, month_key, parse_amount};
pub use types::{DayRecord, Entry, EntryKind, EntryRef, EntryUpdate};
pub use validation::ledger_from_value;

use crate::error::{LedgerError, Result};

/// Allowed drift between stored and recomputed totals.
const TOTAL_TOLERANCE: f64 = 1e-6;

/// All recorded days, ordered by date key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    days: BTreeMap<String, DayRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days(days: BTreeMap<String, DayRecord>) -> Self {
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of recorded days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Exact-key lookup of a day.
    pub fn get(&self, date_key: &str) -> Option<&DayRecord> {
        self.days.get(date_key)
    }

    /// Look up a single entry by day and position.
    pub fn entry(&self, date_key: &str, index: usize) -> Result<&Entry> {
        let day = self
            .days
            .get(date_key)
            .ok_or_else(|| LedgerError::missing_day(date_key))?;
        day.entries
            .get(index)
            .ok_or_else(|| LedgerError::missing_entry(date_key, index))
    }

    /// Iterate days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = (&str, &DayRecord)> {
        self.days.iter().map(|(key, day)| (key.as_str(), day))
    }

    /// Total number of entries across all days.
    pub fn entry_count(&self) -> usize {
        self.days.values().map(|day| day.entries.len()).sum()
    }

    /// Append an entry to the day derived from its timestamp.
    ///
    /// Duplicates are allowed. The amount is not validated here; callers
    /// parse user input with [`parse_amount`] first.
    pub fn add_entry(&mut self, entry: Entry) -> Result<EntryRef> {
        let key = date_key(&entry.time)?;
        let day = self.days.entry(key.clone()).or_default();
        day.apply(entry.kind, entry.amount);
        day.entries.push(entry);
        Ok(EntryRef {
            index: day.entries.len() - 1,
            date_key: key,
        })
    }

    /// Replace the entry at `index` in place, returning the old entry.
    ///
    /// The old entry's contribution is reversed using its own type before the
    /// new contribution is applied using the new type.
    pub fn edit_entry(
        &mut self,
        date_key: &str,
        index: usize,
        update: &EntryUpdate,
    ) -> Result<Entry> {
        let day = self
            .days
            .get_mut(date_key)
            .ok_or_else(|| LedgerError::missing_day(date_key))?;
        let slot = day
            .entries
            .get(index)
            .ok_or_else(|| LedgerError::missing_entry(date_key, index))?;

        let replacement = slot.updated(update);
        let old = std::mem::replace(&mut day.entries[index], replacement);
        day.reverse(old.kind, old.amount);
        day.apply(update.kind, update.amount);
        Ok(old)
    }

    /// Remove the entry at `index`, returning it.
    ///
    /// Later entries shift down by one. Removing the last entry of a day
    /// removes the day itself.
    pub fn delete_entry(&mut self, date_key: &str, index: usize) -> Result<Entry> {
        let day = self
            .days
            .get_mut(date_key)
            .ok_or_else(|| LedgerError::missing_day(date_key))?;
        if index >= day.entries.len() {
            return Err(LedgerError::missing_entry(date_key, index));
        }

        let removed = day.entries.remove(index);
        day.reverse(removed.kind, removed.amount);
        if day.entries.is_empty() {
            self.days.remove(date_key);
        }
        Ok(removed)
    }

    /// Verify the ledger invariants, returning every violation found.
    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for (key, day) in &self.days {
            if !is_date_key(key) {
                issues.push(IntegrityIssue::new(key, "key is not a YYYY-MM-DD date"));
            }
            if day.entries.is_empty() {
                issues.push(IntegrityIssue::new(key, "day has no entries"));
            }
            for (index, entry) in day.entries.iter().enumerate() {
                if !entry.time.starts_with(key.as_str()) {
                    issues.push(IntegrityIssue::new(
                        key,
                        format!("entry #{} is timestamped {}", index, entry.time),
                    ));
                }
            }
            let (credit, debit) = day.recompute();
            if (credit - day.credit).abs() > TOTAL_TOLERANCE {
                issues.push(IntegrityIssue::new(
                    key,
                    format!("credit total {} but entries sum to {}", day.credit, credit),
                ));
            }
            if (debit - day.debit).abs() > TOTAL_TOLERANCE {
                issues.push(IntegrityIssue::new(
                    key,
                    format!("debit total {} but entries sum to {}", day.debit, debit),
                ));
            }
        }
        issues
    }
}

/// A single invariant violation reported by [`Ledger::check_integrity`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityIssue {
    pub date_key: String,
    pub message: String,
}

impl IntegrityIssue {
    fn new(date_key: &str, message: impl Into<String>) -> Self {
        Self {
            date_key: date_key.to_string(),
            message: message.into(),
        }
    }
}
