//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying entries,
//! month grids, and the year picker in JSON or text.

mod json;
mod text;

// Re-export public API
pub use json::{
    calendar_json, cards_json, date_summary_json, day_json, entry_json, key_json, month_key,
    years_json,
};
pub use text::{
    entry_rows, print_entry_card, render_month, render_month_plain, year_row,
};
