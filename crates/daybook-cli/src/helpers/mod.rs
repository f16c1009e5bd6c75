//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Entry text and field collection from flags, stdin, or prompts (`input`)
//! - Date, rating, category, and entry ID parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{collect_entry_fields, EntryFlags};
pub use parsing::{
    normalize_categories, parse_date, parse_date_key, parse_rating, resolve_entry_id,
};
