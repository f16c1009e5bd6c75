//! UI primitives for the Daybook CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badge tokens, color styles, symbols
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, stars, padding)
//! - **Prompt**: Interactive input, select and confirm prompts
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::{header, hint, print};
//!
//! let ctx = app.ui_context(args.json);
//!
//! if ctx.mode.is_json() {
//!     // Handle JSON output separately
//!     return Ok(());
//! }
//!
//! print(&ctx, &header(&ctx, "dates", None));
//! print(&ctx, &hint(&ctx, "daybook day <date>"));
//! ```

mod context;
pub mod format;
mod mode;
mod prompt;
pub mod render;
pub mod theme;

pub use context::{UiContext, UiFlags};
pub use mode::OutputMode;
pub use theme::Badge;

pub use prompt::{prompt_confirm, prompt_input, prompt_select, prompt_validated};

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, print_warning, receipt,
    simple_table, table, Column,
};

pub use format::{format_rating, short_id, single_line, stars, truncate};
