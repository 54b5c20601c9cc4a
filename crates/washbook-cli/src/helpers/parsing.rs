//! Parsing helpers for entry timestamps, date keys and form fields.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use washbook_core::ledger::is_date_key;

use crate::errors::CliError;

const MISSING_FIELDS: &str = "Please fill all fields.";

/// Build the stored timestamp for a new entry.
///
/// No value means now. A bare `YYYY-MM-DD` keeps the current time of day on
/// that date. Anything else must be RFC 3339. The result is UTC with
/// millisecond precision, e.g. `2024-05-01T10:00:00.000Z`.
pub fn parse_entry_timestamp(value: Option<&str>, now: DateTime<Utc>) -> anyhow::Result<String> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(format_timestamp(now));
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date.and_time(now.time());
        return Ok(format_timestamp(DateTime::<Utc>::from_naive_utc_and_offset(
            naive, Utc,
        )));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(format_timestamp(parsed.with_timezone(&Utc)));
    }

    Err(CliError::invalid_input(format!(
        "Invalid date (expected YYYY-MM-DD or RFC 3339): {}",
        value
    ))
    .into())
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Validate a date key given on the command line.
pub fn parse_date_key(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    if !is_date_key(trimmed) {
        return Err(CliError::invalid_input(format!(
            "Invalid date (expected YYYY-MM-DD): {}",
            value
        ))
        .into());
    }
    Ok(trimmed.to_string())
}

/// Return a required form field, rejecting missing or blank values.
pub fn require_field(value: Option<&str>) -> anyhow::Result<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::invalid_input(MISSING_FIELDS).into())
}
