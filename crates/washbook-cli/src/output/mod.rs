//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries
//! and days as JSON or as text tables.

mod json;
mod text;

pub use json::{day_json, entry_json, month_json};
pub use text::{print_day, print_entry};
