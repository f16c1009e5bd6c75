//! # Daybook Core
//!
//! Core library for Daybook - a journaling calendar that files entries by
//! calendar day and browses them on an endless month timeline.
//!
//! This crate provides the domain logic, persistence contract, and navigation
//! state independent of any renderer or the CLI.
//!
//! ## Architecture
//!
//! - **date_key**: Canonical sortable day keys and display strings
//! - **calendar**: Months and 6x7 month grids
//! - **store**: The date-keyed entry store and its key-value backends
//! - **timeline**: Month window, navigation lock, scroll policy, year picker
//! - **carousel**: Cursor over the flattened entry sequence

pub mod calendar;
pub mod carousel;
pub mod date_key;
pub mod error;
pub mod fs;
pub mod store;
pub mod timeline;

pub use calendar::{month_grid, DayCell, Month, MonthGrid};
pub use carousel::{CarouselIndexer, CarouselSlot};
pub use date_key::{from_key, parse_user_date, to_display, to_key, DateKey};
pub use error::{DaybookError, Result};
pub use store::{Entry, EntryStore, EntryUpdate, FileStore, KeyValueStore, MemoryStore, NewEntry};
pub use timeline::{Timeline, TimelineConfig};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
