//! JSON output formatting for entries, days and months.

use serde_json::{json, Value};

use washbook_core::history::MonthSummary;
use washbook_core::{DayRecord, Entry};

/// Convert an entry to JSON, including its address.
pub fn entry_json(date_key: &str, index: usize, entry: &Entry) -> Value {
    json!({
        "date": date_key,
        "index": index,
        "time": entry.time,
        "name": entry.name,
        "amount": entry.amount,
        "desc": entry.desc,
        "type": entry.kind,
    })
}

/// Convert a day with its totals and entries to JSON.
pub fn day_json(date_key: &str, day: &DayRecord) -> Value {
    let entries: Vec<Value> = day
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| entry_json(date_key, index, entry))
        .collect();
    json!({
        "date": date_key,
        "credit": day.credit,
        "debit": day.debit,
        "net": day.net(),
        "entries": entries,
    })
}

/// Convert a monthly summary to JSON.
pub fn month_json(summary: &MonthSummary) -> Value {
    json!({
        "month": summary.month,
        "credit": summary.credit,
        "debit": summary.debit,
        "net": summary.net(),
        "dates": summary.dates,
    })
}
