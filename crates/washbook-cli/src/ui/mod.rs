//! UI primitives for the Washbook CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and the credit/debit palette
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: Amounts, times, truncation

mod context;
pub mod format;
pub mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{
    badge, blank_line, header, hint, kv, print, print_error, print_json, print_warning, receipt,
    table, Column,
};

pub use format::{format_amount, format_bytes, format_net, single_line, time_of_day, truncate};
