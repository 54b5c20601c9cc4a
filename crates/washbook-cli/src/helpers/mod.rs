//! Input parsing helpers for the CLI.

mod parsing;

pub use parsing::{parse_date_key, parse_entry_timestamp, require_field};
