//! Entry storage: the date-keyed store, its data types and the key-value
//! persistence contract it writes through.

mod entry_store;
mod file;
mod memory;
mod traits;
pub mod types;

pub use entry_store::{EntryStore, SubscriptionId, ENTRIES_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
pub use types::{
    validate_description, validate_rating, Entry, EntryUpdate, FlattenedEntry, FlattenedView,
    NewEntry, StoreEvent, RATING_MAX, RATING_MIN,
};
