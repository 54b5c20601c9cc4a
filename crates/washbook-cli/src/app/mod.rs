//! Application-level utilities for the Washbook CLI.
//!
//! This module provides:
//! - Path resolution for the config file and data directory
//! - The per-invocation application context

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::default_export_path;
