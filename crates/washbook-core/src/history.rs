//! Read-only views over a ledger snapshot: search, daily and monthly history.

use std::collections::BTreeMap;

use crate::error::{LedgerError, Result};
use crate::ledger::{month_key, DayRecord, Ledger};

/// Exact-key lookup of a single day.
pub fn search<'a>(ledger: &'a Ledger, date_key: &str) -> Result<&'a DayRecord> {
    ledger
        .get(date_key)
        .ok_or_else(|| LedgerError::missing_day(date_key))
}

/// All days, newest first.
pub fn daily(ledger: &Ledger) -> Vec<(&str, &DayRecord)> {
    let mut days: Vec<_> = ledger.days().collect();
    days.reverse();
    days
}

/// Aggregated totals for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: String,
    pub credit: f64,
    pub debit: f64,
    /// Date keys in this month, newest first
    pub dates: Vec<String>,
}

impl MonthSummary {
    pub fn net(&self) -> f64 {
        self.credit - self.debit
    }
}

/// Per-month totals, newest month first.
pub fn monthly(ledger: &Ledger) -> Vec<MonthSummary> {
    let mut months: BTreeMap<&str, MonthSummary> = BTreeMap::new();
    for (date_key, day) in daily(ledger) {
        let month = month_key(date_key);
        let summary = months.entry(month).or_insert_with(|| MonthSummary {
            month: month.to_string(),
            credit: 0.0,
            debit: 0.0,
            dates: Vec::new(),
        });
        summary.credit += day.credit;
        summary.debit += day.debit;
        summary.dates.push(date_key.to_string());
    }
    months.into_values().rev().collect()
}

/// Grand totals as `(credit, debit)` over every day.
pub fn totals(ledger: &Ledger) -> (f64, f64) {
    ledger
        .days()
        .fold((0.0, 0.0), |(credit, debit), (_, day)| {
            (credit + day.credit, debit + day.debit)
        })
}
