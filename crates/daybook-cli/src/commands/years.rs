use chrono::Datelike;

use daybook_core::date_key::year_label;
use daybook_core::timeline::YearList;

use crate::app::AppContext;
use crate::cli::YearsArgs;
use crate::output::{year_row, years_json};
use crate::ui::{blank_line, header, kv, print};

use super::calendar::load_anchor;

pub fn handle_years(ctx: &AppContext, args: &YearsArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let config = ctx.config()?;

    let center = match args.around {
        Some(year) => year,
        None => anchor_year(ctx)?,
    };
    let mut list = YearList::new(center, config.calendar.years.clone());

    let scroll = match (args.scroll_top, args.viewport) {
        (Some(top), Some(viewport)) => Some(list.on_scroll(top, viewport)),
        _ => None,
    };

    let span = args.rows as i32;
    let rows: Vec<i32> = (center.saturating_sub(span)..=center.saturating_add(span))
        .filter(|year| list.contains(*year))
        .collect();

    if ui_ctx.mode.is_json() {
        let output = years_json(&list, center, &rows, scroll.as_ref());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = format!("{} to {}", year_label(list.first()), year_label(list.last()));
        print(&ui_ctx, &header(&ui_ctx, "years", Some(&context)));
        blank_line(&ui_ctx);
    }
    if let Some(outcome) = &scroll {
        if outcome.extended() || !ui_ctx.mode.is_pretty() {
            print(&ui_ctx, &kv(&ui_ctx, "Prepended", &outcome.prepended.to_string()));
            print(&ui_ctx, &kv(&ui_ctx, "Appended", &outcome.appended.to_string()));
            print(
                &ui_ctx,
                &kv(&ui_ctx, "Scroll adjust", &format!("{}", outcome.scroll_adjust_px)),
            );
            blank_line(&ui_ctx);
        }
    }
    for year in rows {
        print(&ui_ctx, &year_row(&ui_ctx, year, center));
    }
    Ok(())
}

/// Year of the saved calendar anchor, or the current year.
fn anchor_year(ctx: &AppContext) -> anyhow::Result<i32> {
    let store = ctx.open_store()?;
    match load_anchor(store.backend()) {
        Some(month) => Ok(month.year),
        None => Ok(ctx.today()?.year()),
    }
}
