use tracing::info;

use daybook_core::EntryUpdate;

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::helpers::{normalize_categories, parse_date_key, parse_rating, resolve_entry_id};
use crate::output::entry_json;
use crate::ui::{print, receipt, short_id};

use super::ensure_persisted;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let config = ctx.config()?;
    let mut store = ctx.open_store()?;

    let id = resolve_entry_id(&store, &args.id)?;
    let (current_key, _) = store.find(&id).ok_or_else(|| {
        CliError::not_found(
            format!("Entry not found: {}", args.id),
            "Hint: Run `daybook cards --no-input` to list entry IDs.",
        )
    })?;
    let target_key = match args.date.as_deref() {
        Some(value) => parse_date_key(value)?,
        None => current_key.clone(),
    };

    let mut update = EntryUpdate::new(id.clone());
    if let Some(message) = args.message.as_deref() {
        if message.trim().is_empty() {
            return Err(CliError::invalid_input("--message cannot be empty").into());
        }
        update = update.description(message.trim());
    }
    if let Some(rating) = args.rating {
        update = update.rating(parse_rating(rating)?);
    }
    if !args.category.is_empty() {
        let mut categories = normalize_categories(&args.category);
        if categories.is_empty() {
            categories.push(config.entries.default_category.clone());
        }
        update = update.categories(categories);
    }
    if let Some(img_url) = args.img_url.as_deref() {
        update = update.img_url(img_url.trim());
    }

    let moved = target_key != current_key;
    let has_fields = update.description.is_some()
        || update.rating.is_some()
        || update.categories.is_some()
        || update.img_url.is_some();
    if !moved && !has_fields {
        return Err(CliError::invalid_input_with_hint(
            "Nothing to change",
            "Hint: Pass --message, --rating, --category, --img-url, or --date.",
        )
        .into());
    }

    let entry = store.upsert(&target_key, update)?;
    ensure_persisted(&ui_ctx, &mut store)?;
    info!(id = %entry.id, from = %current_key, to = %target_key, moved, "entry edited");

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
        return Ok(());
    }
    if ctx.quiet() {
        return Ok(());
    }

    let title = if moved { "Moved entry" } else { "Updated entry" };
    let display_id = if ui_ctx.mode.is_pretty() {
        short_id(&entry.id)
    } else {
        entry.id.clone()
    };
    let from = current_key.to_string();
    let to = target_key.to_string();
    let mut items: Vec<(&str, &str)> = vec![("ID", display_id.as_str()), ("Date", to.as_str())];
    if moved {
        items.push(("From", from.as_str()));
    }
    print(&ui_ctx, &receipt(&ui_ctx, title, &items));
    Ok(())
}
