use tracing::info;

use daybook_core::Entry;

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::helpers::parse_date_key;
use crate::ui::{print, print_warning, receipt};

use super::ensure_persisted;

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false);
    let date_key = parse_date_key(&args.date)?;
    let mut store = ctx.open_store()?;

    let bucket = store.get(&date_key);
    let Some(id) = match_in_bucket(&bucket, &args.id) else {
        if !ctx.quiet() {
            print_warning(
                &ui_ctx,
                &format!("No entry {} on {}; nothing deleted", args.id, date_key),
            );
        }
        return Ok(());
    };

    let removed = store.remove(&date_key, &id);
    ensure_persisted(&ui_ctx, &mut store)?;
    info!(id = %id, date_key = %date_key, removed, "entry deleted");

    if !ctx.quiet() {
        let remaining = store.bucket_len(&date_key).to_string();
        let date = date_key.to_string();
        print(
            &ui_ctx,
            &receipt(
                &ui_ctx,
                "Deleted entry",
                &[
                    ("ID", id.as_str()),
                    ("Date", date.as_str()),
                    ("Remaining", remaining.as_str()),
                ],
            ),
        );
    }
    Ok(())
}

/// Exact ID, or a prefix matching exactly one entry of the day.
fn match_in_bucket(bucket: &[Entry], input: &str) -> Option<String> {
    let input = input.trim();
    if let Some(entry) = bucket.iter().find(|e| e.id == input) {
        return Some(entry.id.clone());
    }
    let body = input.strip_prefix("entry-").unwrap_or(input);
    if body.is_empty() {
        return None;
    }
    let mut matches = bucket
        .iter()
        .filter(|e| e.id.strip_prefix("entry-").unwrap_or(&e.id).starts_with(body));
    match (matches.next(), matches.next()) {
        (Some(entry), None) => Some(entry.id.clone()),
        _ => None,
    }
}
