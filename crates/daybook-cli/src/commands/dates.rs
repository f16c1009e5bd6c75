use daybook_core::to_display;

use crate::app::AppContext;
use crate::cli::DatesArgs;
use crate::output::date_summary_json;
use crate::ui::{blank_line, header, hint, print, simple_table, Column};

pub fn handle_dates(ctx: &AppContext, args: &DatesArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let store = ctx.open_store()?;
    let keys = store.list_date_keys_sorted();

    if ui_ctx.mode.is_json() {
        let rows: Vec<_> = keys
            .iter()
            .map(|key| date_summary_json(key, store.bucket_len(key)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = format!("{} days, {} entries", keys.len(), store.len());
        print(&ui_ctx, &header(&ui_ctx, "dates", Some(&context)));
        blank_line(&ui_ctx);
    }

    if keys.is_empty() {
        if ui_ctx.mode.is_pretty() && !ctx.quiet() {
            print(&ui_ctx, "No entries yet.");
            blank_line(&ui_ctx);
            print(&ui_ctx, &hint(&ui_ctx, "daybook add -m \"...\""));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = keys
        .iter()
        .map(|key| {
            let count = store.bucket_len(key).to_string();
            if ui_ctx.mode.is_pretty() {
                let day = key.date().map(to_display).unwrap_or_default();
                vec![key.to_string(), day, count]
            } else {
                vec![key.to_string(), count]
            }
        })
        .collect();
    let columns = [Column::new("Key"), Column::new("Date"), Column::right("Entries")];
    print(&ui_ctx, &simple_table(&ui_ctx, &columns, &rows));
    Ok(())
}
