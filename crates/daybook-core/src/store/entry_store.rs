//! The date-keyed entry store.
//!
//! `EntryStore` owns the `DateKey -> bucket` mapping and is the single source
//! of truth for entries. Every mutation is synchronous: it updates memory,
//! re-sorts the touched bucket, writes the whole mapping back through the
//! [`KeyValueStore`], bumps the version and notifies subscribers before
//! returning. Readers therefore never observe a half-applied change.
//!
//! Persistence failures during a mutation are logged and remembered but do
//! not roll back the in-memory state; call [`EntryStore::flush`] to retry and
//! observe the error.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, info, warn};

use super::traits::KeyValueStore;
use super::types::{Entry, EntryUpdate, FlattenedEntry, FlattenedView, StoreEvent};
use crate::date_key::{to_display, DateKey};
use crate::error::{DaybookError, Result};

/// Storage key holding the serialized mapping.
pub const ENTRIES_KEY: &str = "journalEntries";

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Handle returned by [`EntryStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Entry collection indexed by calendar day.
pub struct EntryStore<S: KeyValueStore> {
    backend: S,
    buckets: BTreeMap<DateKey, Vec<Entry>>,
    index: HashMap<String, DateKey>,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    last_persist_error: Option<String>,
}

impl<S: KeyValueStore> fmt::Debug for EntryStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryStore")
            .field("buckets", &self.buckets.len())
            .field("entries", &self.index.len())
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load the persisted mapping from `backend`.
    ///
    /// Missing, unreadable or malformed data yields an empty store. Loaded
    /// data is normalized: each entry is re-filed under its map key, buckets
    /// are re-sorted, empty buckets and invalid keys are dropped, and a
    /// duplicated id keeps only its chronologically first occurrence.
    pub fn init(backend: S) -> Self {
        let mut store = Self {
            backend,
            buckets: BTreeMap::new(),
            index: HashMap::new(),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        };

        let raw = match store.backend.get(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted entries, starting empty");
                return store;
            }
            Err(err) => {
                warn!(error = %err, "failed to read persisted entries, starting empty");
                return store;
            }
        };

        match serde_json::from_str::<BTreeMap<String, Vec<Entry>>>(&raw) {
            Ok(mapping) => store.load_mapping(mapping),
            Err(err) => {
                warn!(error = %err, "discarding malformed persisted entries");
            }
        }

        info!(
            dates = store.buckets.len(),
            entries = store.index.len(),
            "entry store loaded"
        );
        store
    }

    fn load_mapping(&mut self, mapping: BTreeMap<String, Vec<Entry>>) {
        let mut typed: BTreeMap<DateKey, Vec<Entry>> = BTreeMap::new();
        for (raw_key, entries) in mapping {
            match raw_key.parse::<DateKey>() {
                Ok(key) => typed.entry(key).or_default().extend(entries),
                Err(_) => warn!(key = %raw_key, "dropping bucket with invalid date key"),
            }
        }

        for (key, entries) in typed {
            let display = key.date().map(to_display).unwrap_or_default();
            let mut bucket = Vec::with_capacity(entries.len());
            for mut entry in entries {
                if self.index.contains_key(&entry.id) {
                    warn!(id = %entry.id, date_key = %key, "dropping duplicate entry id");
                    continue;
                }
                entry.date_key = key.clone();
                if entry.date.is_empty() {
                    entry.date = display.clone();
                }
                self.index.insert(entry.id.clone(), key.clone());
                bucket.push(entry);
            }
            if bucket.is_empty() {
                continue;
            }
            sort_bucket(&mut bucket);
            self.buckets.insert(key, bucket);
        }
    }

    /// Entries filed under `date_key`, highest rating first. A copy; empty if
    /// the date has no entries.
    pub fn get(&self, date_key: &DateKey) -> Vec<Entry> {
        self.buckets.get(date_key).cloned().unwrap_or_default()
    }

    /// Whether any entry is filed under `date_key`.
    pub fn has_entries(&self, date_key: &DateKey) -> bool {
        self.buckets.contains_key(date_key)
    }

    /// Number of entries filed under `date_key`.
    pub fn bucket_len(&self, date_key: &DateKey) -> usize {
        self.buckets.get(date_key).map_or(0, Vec::len)
    }

    /// Locate an entry by id anywhere in the store.
    pub fn find(&self, id: &str) -> Option<(DateKey, Entry)> {
        let key = self.index.get(id)?;
        let entry = self.buckets.get(key)?.iter().find(|e| e.id == id)?;
        Some((key.clone(), entry.clone()))
    }

    /// Create or update an entry under `date_key`.
    ///
    /// - Same id already in this bucket: shallow merge of the given fields.
    /// - Same id in another bucket: the entry is removed there, merged, and
    ///   filed under `date_key`.
    /// - Unknown id: appended as a new entry.
    ///
    /// The bucket is then re-sorted by descending rating (stable) and the
    /// mapping persisted.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::Validation` if a given field is invalid or a new
    /// entry lacks description or rating, and `DaybookError::InvalidInput` if
    /// `date_key` does not decode to a date. Nothing is changed on error.
    pub fn upsert(&mut self, date_key: &DateKey, update: EntryUpdate) -> Result<Entry> {
        update.validate()?;
        let date = date_key.date().ok_or_else(|| {
            DaybookError::InvalidInput(format!("Invalid date key: {}", date_key))
        })?;

        let id = update.id.clone();
        let event = match self.index.get(&id).cloned() {
            Some(current) if current == *date_key => {
                let bucket = self.buckets.entry(current).or_default();
                if let Some(existing) = bucket.iter_mut().find(|e| e.id == id) {
                    existing.merge(&update);
                }
                debug!(id = %id, date_key = %date_key, "merged entry in place");
                StoreEvent::Upserted {
                    date_key: date_key.clone(),
                    id: id.clone(),
                }
            }
            Some(previous) => {
                let mut entry = self.take_from_bucket(&previous, &id).ok_or_else(|| {
                    DaybookError::Other(format!("Index points at missing entry {}", id))
                })?;
                entry.merge(&update);
                entry.date_key = date_key.clone();
                entry.date = to_display(date);
                self.buckets.entry(date_key.clone()).or_default().push(entry);
                self.index.insert(id.clone(), date_key.clone());
                debug!(id = %id, from = %previous, to = %date_key, "moved entry between dates");
                StoreEvent::Moved {
                    from: previous,
                    to: date_key.clone(),
                    id: id.clone(),
                }
            }
            None => {
                let entry = update.into_entry(date_key.clone(), to_display(date))?;
                self.buckets.entry(date_key.clone()).or_default().push(entry);
                self.index.insert(id.clone(), date_key.clone());
                debug!(id = %id, date_key = %date_key, "added entry");
                StoreEvent::Upserted {
                    date_key: date_key.clone(),
                    id: id.clone(),
                }
            }
        };

        let bucket = self.buckets.entry(date_key.clone()).or_default();
        sort_bucket(bucket);
        let stored = bucket
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| DaybookError::Other(format!("Entry {} vanished after upsert", id)))?;

        self.commit(event);
        Ok(stored)
    }

    /// Delete an entry. Returns `false` (and changes nothing) if it is not
    /// filed under `date_key`. Deleting the last entry of a date removes the
    /// date.
    pub fn remove(&mut self, date_key: &DateKey, id: &str) -> bool {
        let Some(bucket) = self.buckets.get(date_key) else {
            return false;
        };
        if !bucket.iter().any(|e| e.id == id) {
            return false;
        }

        self.take_from_bucket(date_key, id);
        let bucket_removed = !self.buckets.contains_key(date_key);
        debug!(id, date_key = %date_key, bucket_removed, "removed entry");
        self.commit(StoreEvent::Removed {
            date_key: date_key.clone(),
            id: id.to_string(),
            bucket_removed,
        });
        true
    }

    /// All dates with at least one entry, ascending.
    pub fn list_date_keys_sorted(&self) -> Vec<DateKey> {
        self.buckets.keys().cloned().collect()
    }

    /// Every entry across all dates: dates ascending, each bucket in stored
    /// order, annotated with its position and bucket size. Computed from the
    /// current state on every call.
    pub fn flatten_sorted(&self) -> FlattenedView {
        let entries = self
            .buckets
            .values()
            .flat_map(|bucket| {
                let sibling_count = bucket.len();
                bucket
                    .iter()
                    .enumerate()
                    .map(move |(entry_index, entry)| FlattenedEntry {
                        entry: entry.clone(),
                        entry_index,
                        sibling_count,
                    })
            })
            .collect();
        FlattenedView {
            version: self.version,
            entries,
        }
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Mutation counter; increases on every successful change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a change listener. Listeners run synchronously after the
    /// mutation has been applied and persisted.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Write the full mapping to the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend or serialization error. In-memory state is
    /// unaffected either way.
    pub fn flush(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.buckets)?;
        self.backend.set(ENTRIES_KEY, &payload)?;
        self.last_persist_error = None;
        Ok(())
    }

    /// The most recent persistence failure, cleared by the next successful
    /// write.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn take_from_bucket(&mut self, date_key: &DateKey, id: &str) -> Option<Entry> {
        let bucket = self.buckets.get_mut(date_key)?;
        let position = bucket.iter().position(|e| e.id == id)?;
        let entry = bucket.remove(position);
        if bucket.is_empty() {
            self.buckets.remove(date_key);
        }
        self.index.remove(id);
        Some(entry)
    }

    fn commit(&mut self, event: StoreEvent) {
        self.version += 1;
        if let Err(err) = self.flush() {
            warn!(error = %err, "failed to persist entries; keeping in-memory state");
            self.last_persist_error = Some(err.to_string());
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

/// Highest rating first; equal ratings keep insertion order.
fn sort_bucket(bucket: &mut [Entry]) {
    bucket.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}
