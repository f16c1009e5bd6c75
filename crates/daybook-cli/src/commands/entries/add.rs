use tracing::info;

use daybook_core::{to_key, NewEntry};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::helpers::{collect_entry_fields, parse_date, EntryFlags};
use crate::output::entry_json;
use crate::ui::theme::{styled, styles, symbols};
use crate::ui::{badge, blank_line, format_rating, hint, print, short_id, Badge, OutputMode};

use super::ensure_persisted;

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let config = ctx.config()?;

    let date = match args.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => ctx.today()?,
    };
    let date_key = to_key(date);

    let interactive = !args.no_input && ui_ctx.is_interactive();
    let fields = collect_entry_fields(
        &ui_ctx,
        EntryFlags {
            message: args.message.clone(),
            rating: args.rating,
            categories: args.category.clone(),
            img_url: args.img_url.clone(),
        },
        interactive,
        &config.entries.default_category,
        config.entries.default_img_url.as_deref(),
    )?;

    let mut store = ctx.open_store()?;
    let new_entry = NewEntry::new(fields.description, fields.rating)
        .with_categories(fields.categories)
        .with_img_url(fields.img_url);
    let entry = store.upsert(&date_key, new_entry.into())?;
    ensure_persisted(&ui_ctx, &mut store)?;
    info!(id = %entry.id, date_key = %date_key, "entry added");

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
        return Ok(());
    }
    if ctx.quiet() {
        return Ok(());
    }

    let on_day = store.bucket_len(&date_key);
    match ui_ctx.mode {
        OutputMode::Pretty => {
            print(&ui_ctx, &badge(&ui_ctx, Badge::Ok, "Added entry"));
            let sep = symbols::SEP.get(ui_ctx.unicode);
            let context = format!(
                "ID: {}  {}  {}  {}  rating {}  {}  {} on this day",
                short_id(&entry.id),
                sep,
                entry.date,
                sep,
                format_rating(entry.rating),
                sep,
                on_day
            );
            println!("{}", styled(&context, styles::dim(), ui_ctx.color));
            blank_line(&ui_ctx);
            print(
                &ui_ctx,
                &hint(
                    &ui_ctx,
                    &format!(
                        "daybook day {}  {}  daybook edit {}",
                        date_key,
                        sep,
                        short_id(&entry.id)
                    ),
                ),
            );
        }
        OutputMode::Plain | OutputMode::Json => {
            println!("status=ok");
            println!("entry_id={}", entry.id);
            println!("date_key={}", date_key);
            println!("rating={}", format_rating(entry.rating));
            println!("day_count={}", on_day);
        }
    }
    Ok(())
}
