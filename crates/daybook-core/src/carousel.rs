//! Cursor over the flattened entry sequence for card-by-card paging.
//!
//! The indexer holds a [`FlattenedView`] snapshot and an optional absolute
//! position into it. The cursor is absent while the sequence is empty and is
//! otherwise always within `0..len`. `next`/`prev` clamp at the ends.

use tracing::debug;

use crate::date_key::DateKey;
use crate::store::{EntryStore, FlattenedEntry, FlattenedView, KeyValueStore};

/// Number of neighbours materialized on each side of the cursor.
pub const DEFAULT_RADIUS: usize = 2;

/// One materialized card around the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSlot<'a> {
    /// Distance from the cursor (negative = earlier)
    pub offset: isize,
    /// Absolute position in the sequence
    pub index: usize,
    pub entry: &'a FlattenedEntry,
}

#[derive(Debug, Clone, Default)]
pub struct CarouselIndexer {
    view: FlattenedView,
    cursor: Option<usize>,
}

impl CarouselIndexer {
    pub fn new(view: FlattenedView) -> Self {
        Self { view, cursor: None }
    }

    /// Build from the current contents of `store`.
    pub fn from_store<S: KeyValueStore>(store: &EntryStore<S>) -> Self {
        Self::new(store.flatten_sorted())
    }

    /// Store version the snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.view.version
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlattenedEntry> {
        self.view.get(index)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&FlattenedEntry> {
        self.cursor.and_then(|index| self.view.get(index))
    }

    /// Re-snapshot `store` if it changed since the last snapshot.
    ///
    /// The cursor follows the entry it pointed at when that entry still
    /// exists (wherever it moved); otherwise it is clamped to the new
    /// sequence. Returns `true` if the snapshot was replaced.
    pub fn refresh<S: KeyValueStore>(&mut self, store: &EntryStore<S>) -> bool {
        if store.version() == self.view.version {
            return false;
        }

        let current_id = self.current().map(|e| e.id().to_string());
        let previous = self.cursor;
        self.view = store.flatten_sorted();

        self.cursor = match (current_id, previous) {
            (Some(id), Some(index)) => self
                .view
                .entries
                .iter()
                .position(|e| e.id() == id)
                .or_else(|| self.clamp(index)),
            (_, previous) => previous.and_then(|index| self.clamp(index)),
        };
        debug!(
            version = self.view.version,
            len = self.view.len(),
            cursor = ?self.cursor,
            "carousel snapshot refreshed"
        );
        true
    }

    /// Point the cursor at the entry `(date_key, id)`.
    ///
    /// Unknown entries leave the cursor unchanged and return `None`.
    pub fn open_at(&mut self, date_key: &DateKey, id: &str) -> Option<usize> {
        let index = self.view.position_of(date_key, id)?;
        self.cursor = Some(index);
        Some(index)
    }

    /// Point the cursor at the first entry filed under `date_key`.
    pub fn open_at_date(&mut self, date_key: &DateKey) -> Option<usize> {
        let index = self.view.first_on(date_key)?;
        self.cursor = Some(index);
        Some(index)
    }

    /// Point the cursor at an absolute index, clamped into range.
    pub fn open_index(&mut self, index: usize) -> Option<usize> {
        self.cursor = self.clamp(index);
        self.cursor
    }

    /// Advance one card. Stays on the last card at the end.
    pub fn next(&mut self) -> Option<usize> {
        self.cursor = self.cursor.and_then(|index| self.clamp(index.saturating_add(1)));
        self.cursor
    }

    /// Step back one card. Stays on the first card at the start.
    pub fn prev(&mut self) -> Option<usize> {
        self.cursor = self.cursor.and_then(|index| self.clamp(index.saturating_sub(1)));
        self.cursor
    }

    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(index) if index + 1 < self.len())
    }

    pub fn has_prev(&self) -> bool {
        matches!(self.cursor, Some(index) if index > 0)
    }

    /// Cards within `radius` of the cursor, in sequence order.
    pub fn window(&self, radius: usize) -> Vec<CarouselSlot<'_>> {
        let Some(cursor) = self.cursor else {
            return Vec::new();
        };
        let start = cursor.saturating_sub(radius);
        let end = cursor.saturating_add(radius).min(self.len().saturating_sub(1));
        (start..=end)
            .filter_map(|index| {
                self.view.get(index).map(|entry| CarouselSlot {
                    offset: index as isize - cursor as isize,
                    index,
                    entry,
                })
            })
            .collect()
    }

    fn clamp(&self, index: usize) -> Option<usize> {
        match self.view.len() {
            0 => None,
            len => Some(index.min(len - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EntryUpdate, MemoryStore, NewEntry};
    use std::str::FromStr;

    fn key(s: &str) -> DateKey {
        DateKey::from_str(s).unwrap()
    }

    fn seeded() -> EntryStore<MemoryStore> {
        let mut store = EntryStore::init(MemoryStore::new());
        store
            .upsert(&key("2024-03-01"), NewEntry::new("A", 4.0).with_id("a").into())
            .unwrap();
        store
            .upsert(&key("2024-03-01"), NewEntry::new("B", 5.0).with_id("b").into())
            .unwrap();
        store
            .upsert(&key("2024-03-02"), NewEntry::new("C", 3.0).with_id("c").into())
            .unwrap();
        store
    }

    fn ids(carousel: &CarouselIndexer) -> Vec<String> {
        (0..carousel.len())
            .filter_map(|i| carousel.get(i).map(|e| e.id().to_string()))
            .collect()
    }

    #[test]
    fn test_open_at_uses_absolute_position() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);

        assert_eq!(ids(&carousel), vec!["b", "a", "c"]);
        assert_eq!(carousel.open_at(&key("2024-03-02"), "c"), Some(2));
        assert_eq!(carousel.current().map(|e| e.entry_index), Some(0));
    }

    #[test]
    fn test_next_prev_clamp() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_at(&key("2024-03-01"), "b");

        assert_eq!(carousel.prev(), Some(0));
        assert_eq!(carousel.next(), Some(1));
        assert_eq!(carousel.next(), Some(2));
        assert_eq!(carousel.next(), Some(2));
        assert!(!carousel.has_next());
        assert!(carousel.has_prev());
    }

    #[test]
    fn test_empty_sequence_is_noop() {
        let store = EntryStore::init(MemoryStore::new());
        let mut carousel = CarouselIndexer::from_store(&store);

        assert_eq!(carousel.next(), None);
        assert_eq!(carousel.prev(), None);
        assert_eq!(carousel.open_index(5), None);
        assert!(carousel.current().is_none());
        assert!(carousel.window(DEFAULT_RADIUS).is_empty());
    }

    #[test]
    fn test_unknown_entry_keeps_cursor() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_index(1);

        assert_eq!(carousel.open_at(&key("2024-03-01"), "missing"), None);
        assert_eq!(carousel.cursor(), Some(1));
    }

    #[test]
    fn test_open_index_clamps() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        assert_eq!(carousel.open_index(99), Some(2));
    }

    #[test]
    fn test_open_at_date() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        assert_eq!(carousel.open_at_date(&key("2024-03-02")), Some(2));
        assert_eq!(carousel.open_at_date(&key("1999-01-01")), None);
    }

    #[test]
    fn test_window_is_truncated_at_edges() {
        let store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_index(0);

        let window = carousel.window(DEFAULT_RADIUS);
        let offsets: Vec<isize> = window.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert_eq!(window[1].entry.id(), "a");
    }

    #[test]
    fn test_refresh_follows_entry() {
        let mut store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_at(&key("2024-03-02"), "c");

        store
            .upsert(&key("2024-02-01"), NewEntry::new("Z", 2.0).with_id("z").into())
            .unwrap();
        assert!(carousel.refresh(&store));

        assert_eq!(carousel.current().map(|e| e.id()), Some("c"));
        assert_eq!(carousel.cursor(), Some(3));
        assert!(!carousel.refresh(&store));
    }

    #[test]
    fn test_refresh_follows_moved_entry() {
        let mut store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_at(&key("2024-03-01"), "b");

        store
            .upsert(&key("2024-04-01"), EntryUpdate::new("b"))
            .unwrap();
        carousel.refresh(&store);

        assert_eq!(carousel.current().map(|e| e.id()), Some("b"));
        assert_eq!(carousel.cursor(), Some(2));
    }

    #[test]
    fn test_refresh_clamps_after_delete() {
        let mut store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_at(&key("2024-03-02"), "c");

        store.remove(&key("2024-03-02"), "c");
        carousel.refresh(&store);

        assert_eq!(carousel.cursor(), Some(1));
        assert_eq!(carousel.current().map(|e| e.id()), Some("a"));
    }

    #[test]
    fn test_refresh_to_empty_clears_cursor() {
        let mut store = seeded();
        let mut carousel = CarouselIndexer::from_store(&store);
        carousel.open_index(0);

        for (date, id) in [("2024-03-01", "a"), ("2024-03-01", "b"), ("2024-03-02", "c")] {
            store.remove(&key(date), id);
        }
        carousel.refresh(&store);

        assert_eq!(carousel.cursor(), None);
        assert!(carousel.is_empty());
    }
}
