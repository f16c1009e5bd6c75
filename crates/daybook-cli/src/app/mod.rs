//! Application-level utilities for the Daybook CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for the config file and data directory

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{resolve_config_path, resolve_data_dir};
