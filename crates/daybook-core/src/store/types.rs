//! Core data types for the entry store.
//!
//! `Entry` is the persisted record; its serialized field names match the
//! stored mapping layout (`imgUrl`, `dateKey`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::DateKey;
use crate::error::{DaybookError, Result};

/// Lowest allowed rating.
pub const RATING_MIN: f64 = 1.0;
/// Highest allowed rating.
pub const RATING_MAX: f64 = 5.0;

/// One journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque unique identifier, immutable once created
    pub id: String,

    /// Entry text (non-empty)
    pub description: String,

    /// Rating in [1.0, 5.0]
    pub rating: f64,

    /// Short labels, insertion order preserved
    #[serde(default)]
    pub categories: Vec<String>,

    /// Optional image reference (empty when unset)
    #[serde(default)]
    pub img_url: String,

    /// Display form of the date, redundant with `date_key`
    #[serde(default)]
    pub date: String,

    /// Bucket this entry is filed under; always equals the enclosing map key
    pub date_key: DateKey,
}

impl Entry {
    /// Apply a shallow field merge. Fields left unset in `update` are kept.
    pub fn merge(&mut self, update: &EntryUpdate) {
        if let Some(ref description) = update.description {
            self.description = description.clone();
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(ref categories) = update.categories {
            self.categories = categories.clone();
        }
        if let Some(ref img_url) = update.img_url {
            self.img_url = img_url.clone();
        }
    }

    /// Whether an image reference is set.
    pub fn has_image(&self) -> bool {
        !self.img_url.trim().is_empty()
    }
}

/// Save payload: an id plus the fields to write.
///
/// For an existing id only the `Some` fields replace stored values. A new id
/// needs at least `description` and `rating`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub id: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub img_url: Option<String>,
}

impl EntryUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    /// Check the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(DaybookError::Validation("Entry id is empty".to_string()));
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }

    /// Build a fresh entry from this payload, filed under `date_key`.
    pub(crate) fn into_entry(self, date_key: DateKey, date: String) -> Result<Entry> {
        let description = self.description.ok_or_else(|| {
            DaybookError::Validation(format!("New entry {} has no description", self.id))
        })?;
        let rating = self.rating.ok_or_else(|| {
            DaybookError::Validation(format!("New entry {} has no rating", self.id))
        })?;
        Ok(Entry {
            id: self.id,
            description,
            rating,
            categories: self.categories.unwrap_or_default(),
            img_url: self.img_url.unwrap_or_default(),
            date,
            date_key,
        })
    }
}

/// Builder for brand-new entries. Generates a UUID id unless one is given.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub id: Option<String>,
    pub description: String,
    pub rating: f64,
    pub categories: Vec<String>,
    pub img_url: String,
}

impl NewEntry {
    pub fn new(description: impl Into<String>, rating: f64) -> Self {
        Self {
            id: None,
            description: description.into(),
            rating,
            categories: Vec::new(),
            img_url: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = img_url.into();
        self
    }
}

impl From<NewEntry> for EntryUpdate {
    fn from(entry: NewEntry) -> Self {
        EntryUpdate {
            id: entry
                .id
                .unwrap_or_else(|| format!("entry-{}", Uuid::new_v4())),
            description: Some(entry.description),
            rating: Some(entry.rating),
            categories: Some(entry.categories),
            img_url: Some(entry.img_url),
        }
    }
}

/// One element of the flattened view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedEntry {
    #[serde(flatten)]
    pub entry: Entry,
    /// Position within its bucket
    pub entry_index: usize,
    /// Size of its bucket
    pub sibling_count: usize,
}

impl FlattenedEntry {
    pub fn date_key(&self) -> &DateKey {
        &self.entry.date_key
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }
}

/// All entries, buckets in ascending date order, each bucket in stored
/// order. Tagged with the store version it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlattenedView {
    pub version: u64,
    pub entries: Vec<FlattenedEntry>,
}

impl FlattenedView {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlattenedEntry> {
        self.entries.get(index)
    }

    /// Absolute position of an entry by `(date_key, id)`.
    pub fn position_of(&self, date_key: &DateKey, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.date_key() == date_key && e.id() == id)
    }

    /// Absolute position of the first entry filed under `date_key`.
    pub fn first_on(&self, date_key: &DateKey) -> Option<usize> {
        self.entries.iter().position(|e| e.date_key() == date_key)
    }
}

/// Change notification emitted after every store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// An entry was created or merged in place.
    Upserted { date_key: DateKey, id: String },
    /// An entry changed buckets.
    Moved {
        from: DateKey,
        to: DateKey,
        id: String,
    },
    /// An entry was deleted. `bucket_removed` is set when it was the last one.
    Removed {
        date_key: DateKey,
        id: String,
        bucket_removed: bool,
    },
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(DaybookError::Validation(
            "Entry description is empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(DaybookError::Validation(format!(
            "Rating {} is outside {:.1}-{:.1}",
            rating, RATING_MIN, RATING_MAX
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_entry_builder() {
        let update: EntryUpdate = NewEntry::new("Morning run", 4.5)
            .with_categories(vec!["Fitness".to_string()])
            .with_img_url("https://example.com/run.jpg")
            .into();

        assert!(update.id.starts_with("entry-"));
        assert_eq!(update.description.as_deref(), Some("Morning run"));
        assert_eq!(update.rating, Some(4.5));
        assert_eq!(update.categories.as_ref().map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_new_entry_keeps_explicit_id() {
        let update: EntryUpdate = NewEntry::new("x", 3.0).with_id("x").into();
        assert_eq!(update.id, "x");
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut entry = EntryUpdate::new("a")
            .description("first")
            .rating(3.0)
            .categories(vec!["Food".to_string()])
            .into_entry(key("2024-03-01"), String::new())
            .unwrap();

        entry.merge(&EntryUpdate::new("a").rating(4.2));

        assert_eq!(entry.description, "first");
        assert_eq!(entry.rating, 4.2);
        assert_eq!(entry.categories, vec!["Food".to_string()]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        assert!(EntryUpdate::new("a").rating(0.5).validate().is_err());
        assert!(EntryUpdate::new("a").rating(5.1).validate().is_err());
        assert!(EntryUpdate::new("a").rating(f64::NAN).validate().is_err());
        assert!(EntryUpdate::new("a").rating(1.0).validate().is_ok());
        assert!(EntryUpdate::new("a").rating(5.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_description_and_id() {
        assert!(EntryUpdate::new("a").description("   ").validate().is_err());
        assert!(EntryUpdate::new("").validate().is_err());
    }

    #[test]
    fn test_into_entry_requires_description_and_rating() {
        let missing_rating = EntryUpdate::new("a").description("text");
        assert!(missing_rating
            .into_entry(key("2024-03-01"), String::new())
            .is_err());
    }

    #[test]
    fn test_entry_serializes_with_stored_field_names() {
        let entry = EntryUpdate::new("a")
            .description("text")
            .rating(4.0)
            .into_entry(key("2024-03-01"), "Fri, Mar 1, 2024".to_string())
            .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["dateKey"], "2024-03-01");
        assert_eq!(json["imgUrl"], "");
        assert_eq!(json["date"], "Fri, Mar 1, 2024");
    }

    #[test]
    fn test_entry_deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"a","description":"d","rating":4,"dateKey":"2024-03-01"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(entry.categories.is_empty());
        assert!(!entry.has_image());
    }
}
