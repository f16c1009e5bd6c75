//! Parsing helpers for dates, ratings, categories, and entry IDs.

use chrono::NaiveDate;

use daybook_core::store::validate_rating;
use daybook_core::{parse_user_date, to_key, DateKey, EntryStore, KeyValueStore};

use crate::errors::CliError;

const DATE_HINT: &str =
    "Hint: Use YYYY-MM-DD. Signed years work too, e.g. -0043-03-15 for 44 BC.";

/// Parse a date typed on the command line.
pub fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    parse_user_date(value)
        .map_err(|e| CliError::invalid_input_with_hint(e.to_string(), DATE_HINT).into())
}

/// Parse a date argument straight into its storage key.
pub fn parse_date_key(value: &str) -> anyhow::Result<DateKey> {
    parse_date(value).map(to_key)
}

/// Check a rating value from a flag or prompt.
pub fn parse_rating(value: f64) -> anyhow::Result<f64> {
    validate_rating(value).map_err(|e| {
        CliError::invalid_input_with_hint(e.to_string(), "Hint: Ratings run from 1.0 to 5.0.")
    })?;
    Ok(value)
}

/// Parse rating text typed at a prompt.
pub fn parse_rating_text(value: &str) -> anyhow::Result<f64> {
    let rating: f64 = value
        .trim()
        .parse()
        .map_err(|_| CliError::invalid_input(format!("Invalid rating: {}", value.trim())))?;
    parse_rating(rating)
}

/// Split comma-separated category values, trimming blanks and dropping
/// empties and repeats. First occurrence order is kept.
pub fn normalize_categories<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for value in values {
        for part in value.as_ref().split(',') {
            let part = part.trim();
            if !part.is_empty() && !categories.iter().any(|c| c == part) {
                categories.push(part.to_string());
            }
        }
    }
    categories
}

/// Resolve a full entry ID or a unique prefix of its UUID part.
pub fn resolve_entry_id<S: KeyValueStore>(
    store: &EntryStore<S>,
    input: &str,
) -> anyhow::Result<String> {
    let input = input.trim();
    if store.find(input).is_some() {
        return Ok(input.to_string());
    }

    let body = input.strip_prefix("entry-").unwrap_or(input);
    if body.is_empty() {
        return Err(CliError::invalid_input("Entry ID is empty").into());
    }
    let view = store.flatten_sorted();
    let matches: Vec<&str> = view
        .entries
        .iter()
        .map(|e| e.id())
        .filter(|id| id.strip_prefix("entry-").unwrap_or(id).starts_with(body))
        .collect();

    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(CliError::not_found(
            format!("Entry not found: {}", input),
            "Hint: Run `daybook cards --no-input` to list entry IDs.",
        )
        .into()),
        _ => Err(CliError::invalid_input_with_hint(
            format!("Entry ID prefix is ambiguous: {}", input),
            "Hint: Use more characters of the ID.",
        )
        .into()),
    }
}
