//! Shape validation for externally supplied ledgers.
//!
//! Imported JSON is checked field by field before it is allowed to replace
//! the in-memory ledger, so a parseable but foreign document is rejected with
//! a message pointing at the offending field.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::keys::is_date_key;
use super::types::{DayRecord, Entry, EntryKind};
use super::Ledger;
use crate::error::{LedgerError, Result};

/// Validate a JSON document and convert it into a ledger.
///
/// Accepts `{ [dateKey]: { credit, debit, entries: [{ time, name, amount,
/// desc?, type }] } }`. Stored totals are taken as-is; mismatches are
/// reported by [`Ledger::check_integrity`], not here.
///
/// The result is normalized rather than a verbatim copy: a missing or `null`
/// `desc` becomes `""`, integer numbers become floats, and fields outside
/// this shape are dropped.
pub fn ledger_from_value(value: &Value) -> Result<Ledger> {
    let root = value
        .as_object()
        .ok_or_else(|| invalid("ledger must be a JSON object keyed by date"))?;

    let mut days = BTreeMap::new();
    for (date_key, day_value) in root {
        if !is_date_key(date_key) {
            return Err(invalid(format!(
                "key \"{}\" is not a YYYY-MM-DD date",
                date_key
            )));
        }
        let day = day_from_value(date_key, day_value)?;
        days.insert(date_key.clone(), day);
    }

    Ok(Ledger::from_days(days))
}

fn day_from_value(date_key: &str, value: &Value) -> Result<DayRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("{} must be an object", date_key)))?;

    let credit = number_field(obj, "credit", date_key)?;
    let debit = number_field(obj, "debit", date_key)?;
    let entries_value = obj
        .get("entries")
        .and_then(|value| value.as_array())
        .ok_or_else(|| invalid(format!("{}.entries must be an array", date_key)))?;
    if entries_value.is_empty() {
        return Err(invalid(format!("{}.entries must not be empty", date_key)));
    }

    let mut entries = Vec::with_capacity(entries_value.len());
    for (index, entry_value) in entries_value.iter().enumerate() {
        let path = format!("{}.entries[{}]", date_key, index);
        entries.push(entry_from_value(&path, entry_value)?);
    }

    Ok(DayRecord {
        credit,
        debit,
        entries,
    })
}

fn entry_from_value(path: &str, value: &Value) -> Result<Entry> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("{} must be an object", path)))?;

    let time = string_field(obj, "time", path)?;
    let name = string_field(obj, "name", path)?;
    let amount = number_field(obj, "amount", path)?;
    if amount < 0.0 {
        return Err(invalid(format!("{}.amount must not be negative", path)));
    }

    let desc = match obj.get("desc") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(desc)) => desc.clone(),
        Some(_) => return Err(invalid(format!("{}.desc must be a string", path))),
    };

    let kind = match obj.get("type").and_then(|value| value.as_str()) {
        Some("credit") => EntryKind::Credit,
        Some("debit") => EntryKind::Debit,
        _ => {
            return Err(invalid(format!(
                "{}.type must be \"credit\" or \"debit\"",
                path
            )))
        }
    };

    Ok(Entry {
        time,
        name,
        amount,
        desc,
        kind,
    })
}

fn number_field(obj: &Map<String, Value>, field: &str, path: &str) -> Result<f64> {
    obj.get(field)
        .and_then(|value| value.as_f64())
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(format!("{}.{} must be a number", path, field)))
}

fn string_field(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String> {
    obj.get(field)
        .and_then(|value| value.as_str())
        .map(String::from)
        .ok_or_else(|| invalid(format!("{}.{} must be a string", path, field)))
}

fn invalid(message: impl Into<String>) -> LedgerError {
    LedgerError::Import(message.into())
}
