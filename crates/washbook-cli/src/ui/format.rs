//! String formatting utilities for UI rendering.

use chrono::{DateTime, Local};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a money amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a signed net amount, e.g. `+150.00` or `-20.00`.
pub fn format_net(net: f64) -> String {
    if net < 0.0 {
        format!("-{:.2}", -net)
    } else {
        format!("+{:.2}", net)
    }
}

/// Local time of day for an entry timestamp, or the raw value if unparseable.
pub fn time_of_day(time: &str) -> String {
    match DateTime::parse_from_rfc3339(time) {
        Ok(parsed) => parsed.with_timezone(&Local).format("%H:%M").to_string(),
        Err(_) => time.to_string(),
    }
}

/// Format bytes as human-readable size.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(200.0), "200.00");
        assert_eq!(format_amount(12.5), "12.50");
    }

    #[test]
    fn test_format_net() {
        assert_eq!(format_net(150.0), "+150.00");
        assert_eq!(format_net(0.0), "+0.00");
        assert_eq!(format_net(-20.0), "-20.00");
    }

    #[test]
    fn test_time_of_day_falls_back_to_raw() {
        assert_eq!(time_of_day("sometime"), "sometime");
        assert_eq!(time_of_day("2024-05-01T10:00:00.000Z").len(), 5);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("full\nwash"), "full wash");
    }
}
