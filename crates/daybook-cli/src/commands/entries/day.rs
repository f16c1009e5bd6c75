use daybook_core::date_key::to_long_display;
use daybook_core::to_key;

use crate::app::AppContext;
use crate::cli::DayArgs;
use crate::helpers::parse_date;
use crate::output::{day_json, entry_rows};
use crate::ui::{blank_line, header, hint, print, table, Column};

pub fn handle_day(ctx: &AppContext, args: &DayArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => ctx.today()?,
    };
    let date_key = to_key(date);

    let store = ctx.open_store()?;
    let entries = store.get(&date_key);

    if ui_ctx.mode.is_json() {
        let output = serde_json::to_string_pretty(&day_json(&date_key, date, &entries))?;
        println!("{}", output);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        print(&ui_ctx, &header(&ui_ctx, "day", Some(&to_long_display(date))));
        blank_line(&ui_ctx);
    }

    if entries.is_empty() {
        if !ctx.quiet() && ui_ctx.mode.is_pretty() {
            print(&ui_ctx, "No entries for this day.");
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(&ui_ctx, &format!("daybook add --date {} -m \"...\"", date_key)),
            );
        }
        return Ok(());
    }

    let columns = [
        Column::new("ID"),
        Column::right("Rating"),
        Column::new("Categories"),
        Column::new("Entry").max_width(48),
    ];
    print(&ui_ctx, &table(&ui_ctx, &columns, &entry_rows(&ui_ctx, &entries)));
    Ok(())
}
