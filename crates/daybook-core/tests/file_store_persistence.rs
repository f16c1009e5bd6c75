use std::fs;
use std::str::FromStr;

use daybook_core::store::{EntryStore, FileStore, KeyValueStore, NewEntry, ENTRIES_KEY};
use daybook_core::{CarouselIndexer, DateKey, EntryUpdate};
use tempfile::TempDir;

fn key(s: &str) -> DateKey {
    DateKey::from_str(s).expect("valid date key")
}

fn open(dir: &TempDir) -> EntryStore<FileStore> {
    let backend = FileStore::open(dir.path()).expect("open should succeed");
    EntryStore::init(backend)
}

#[test]
fn test_entries_survive_reopen() {
    let dir = TempDir::new().expect("temp dir");

    {
        let mut store = open(&dir);
        store
            .upsert(
                &key("2024-03-01"),
                NewEntry::new("Walked the pier", 4.0)
                    .with_id("pier")
                    .with_categories(vec!["Outdoors".to_string()])
                    .into(),
            )
            .expect("upsert should succeed");
        store
            .upsert(&key("-999955-03-15"), NewEntry::new("Ides", 5.0).with_id("ides").into())
            .expect("upsert should succeed");
        store.flush().expect("flush should succeed");
    }

    let store = open(&dir);
    assert_eq!(store.len(), 2);
    assert_eq!(
        store.list_date_keys_sorted(),
        vec![key("-999955-03-15"), key("2024-03-01")]
    );

    let (date_key, entry) = store.find("pier").expect("entry should be found");
    assert_eq!(date_key, key("2024-03-01"));
    assert_eq!(entry.categories, vec!["Outdoors".to_string()]);
    assert_eq!(entry.date, "Fri, Mar 1, 2024");
}

#[test]
fn test_persisted_layout_uses_camel_case() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    store
        .upsert(
            &key("2024-03-01"),
            NewEntry::new("Photo day", 3.0)
                .with_id("photo")
                .with_img_url("https://example.com/a.png")
                .into(),
        )
        .expect("upsert should succeed");

    let raw = store
        .backend()
        .get(ENTRIES_KEY)
        .expect("read should succeed")
        .expect("mapping should be written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let entry = &value["2024-03-01"][0];
    assert_eq!(entry["imgUrl"], "https://example.com/a.png");
    assert_eq!(entry["dateKey"], "2024-03-01");
    assert_eq!(entry["rating"], 3.0);
}

#[test]
fn test_corrupt_file_loads_empty() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("journalEntries.json"), "{ not json").expect("write");

    let mut store = open(&dir);
    assert!(store.is_empty());

    store
        .upsert(&key("2024-03-01"), NewEntry::new("Fresh", 2.0).with_id("fresh").into())
        .expect("upsert should succeed");
    drop(store);

    let store = open(&dir);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_move_then_reopen_keeps_single_copy() {
    let dir = TempDir::new().expect("temp dir");
    {
        let mut store = open(&dir);
        store
            .upsert(&key("2024-03-01"), NewEntry::new("Trip", 4.5).with_id("trip").into())
            .expect("upsert should succeed");
        store
            .upsert(&key("2024-03-09"), EntryUpdate::new("trip").rating(5.0))
            .expect("move should succeed");
    }

    let store = open(&dir);
    assert!(!store.has_entries(&key("2024-03-01")));
    assert_eq!(store.get(&key("2024-03-09")).len(), 1);
    assert_eq!(store.get(&key("2024-03-09"))[0].rating, 5.0);
}

#[test]
fn test_carousel_over_reopened_store() {
    let dir = TempDir::new().expect("temp dir");
    {
        let mut store = open(&dir);
        for (date, id, rating) in [
            ("2024-03-02", "c", 3.0),
            ("2024-03-01", "a", 2.0),
            ("2024-03-01", "b", 4.0),
        ] {
            store
                .upsert(&key(date), NewEntry::new(id, rating).with_id(id).into())
                .expect("upsert should succeed");
        }
    }

    let store = open(&dir);
    let mut carousel = CarouselIndexer::from_store(&store);
    assert_eq!(carousel.open_at(&key("2024-03-01"), "a"), Some(1));
    assert_eq!(carousel.next(), Some(2));
    assert_eq!(carousel.current().map(|e| e.id()), Some("c"));
}
