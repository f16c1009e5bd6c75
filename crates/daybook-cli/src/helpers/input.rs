//! Input handling for entry fields: flags first, then stdin, then prompts.

use std::io::{self, IsTerminal, Read};

use crate::ui::{format_rating, prompt_input, prompt_validated, UiContext};

use super::parsing::{normalize_categories, parse_rating, parse_rating_text};

/// Rating offered when none is given.
pub const DEFAULT_RATING: f64 = 4.0;

/// Fields collected for a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub description: String,
    pub rating: f64,
    pub categories: Vec<String>,
    pub img_url: String,
}

/// Raw values from the command line.
#[derive(Debug, Clone, Default)]
pub struct EntryFlags {
    pub message: Option<String>,
    pub rating: Option<f64>,
    pub categories: Vec<String>,
    pub img_url: Option<String>,
}

/// Gather the fields of a new entry.
///
/// Missing values are prompted for when `interactive`; otherwise the rating
/// falls back to [`DEFAULT_RATING`] and categories to `default_category`.
pub fn collect_entry_fields(
    ui: &UiContext,
    flags: EntryFlags,
    interactive: bool,
    default_category: &str,
    default_img_url: Option<&str>,
) -> anyhow::Result<EntryFields> {
    let description = read_description(ui, flags.message, interactive)?;

    let rating = match flags.rating {
        Some(value) => parse_rating(value)?,
        None if interactive => {
            let default = format_rating(DEFAULT_RATING);
            let text = prompt_validated(ui, "Rating (1-5)", Some(&default), |value| {
                parse_rating_text(value).map(|_| ()).map_err(|e| e.to_string())
            })?;
            parse_rating_text(&text)?
        }
        None => DEFAULT_RATING,
    };

    let mut categories = normalize_categories(&flags.categories);
    if flags.categories.is_empty() && interactive {
        let text = prompt_input(ui, "Categories (comma separated)", Some(default_category))?;
        categories = normalize_categories(&[text]);
    }
    if categories.is_empty() {
        categories.push(default_category.to_string());
    }

    let img_url = match flags.img_url {
        Some(url) => url.trim().to_string(),
        None => default_img_url.unwrap_or_default().trim().to_string(),
    };

    Ok(EntryFields {
        description,
        rating,
        categories,
        img_url,
    })
}

/// Read the entry text from `--message`, piped stdin, or a prompt.
pub fn read_description(
    ui: &UiContext,
    message: Option<String>,
    interactive: bool,
) -> anyhow::Result<String> {
    if let Some(value) = message {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("--message cannot be empty"));
        }
        return Ok(trimmed.to_string());
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!(
                "No entry text provided on stdin\nHint: Pass the text with --message."
            ));
        }
        return Ok(trimmed.to_string());
    }

    if !interactive {
        return Err(anyhow::anyhow!(
            "--no-input requires --message or text on stdin"
        ));
    }

    let text = prompt_validated(ui, "What happened?", None, |value| {
        if value.trim().is_empty() {
            Err("Entry text cannot be empty".to_string())
        } else {
            Ok(())
        }
    })?;
    Ok(text.trim().to_string())
}
