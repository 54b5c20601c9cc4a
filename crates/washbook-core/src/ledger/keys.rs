//! Date keys and amount parsing.

use chrono::NaiveDate;

use crate::error::{LedgerError, Result};

const DATE_KEY_LEN: usize = 10;
const MONTH_KEY_LEN: usize = 7;

/// Derive the `YYYY-MM-DD` date key from an entry timestamp.
///
/// The key is the first ten characters of the timestamp and must be a real
/// calendar date.
pub fn date_key(timestamp: &str) -> Result<String> {
    let prefix: String = timestamp.chars().take(DATE_KEY_LEN).collect();
    if !is_date_key(&prefix) {
        return Err(LedgerError::Validation(format!(
            "Timestamp does not start with a YYYY-MM-DD date: {}",
            timestamp
        )));
    }
    Ok(prefix)
}

/// Check that `key` is a zero-padded `YYYY-MM-DD` calendar date.
pub fn is_date_key(key: &str) -> bool {
    let bytes = key.as_bytes();
    let shaped = bytes.len() == DATE_KEY_LEN
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    shaped && NaiveDate::parse_from_str(key, "%Y-%m-%d").is_ok()
}

/// The `YYYY-MM` month a date key belongs to.
pub fn month_key(date_key: &str) -> &str {
    date_key.get(..MONTH_KEY_LEN).unwrap_or(date_key)
}

/// Parse a user-typed amount into a finite, non-negative number.
pub fn parse_amount(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("Amount is required".to_string()));
    }
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::Validation(format!("Invalid amount: {}", value)))?;
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!("Invalid amount: {}", value)));
    }
    if amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "Amount must not be negative: {}",
            value
        )));
    }
    Ok(amount)
}
