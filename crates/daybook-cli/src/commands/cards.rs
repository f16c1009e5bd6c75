use daybook_core::{CarouselIndexer, EntryStore, FileStore};

use crate::app::AppContext;
use crate::cli::CardsArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date_key, resolve_entry_id};
use crate::output::{cards_json, print_entry_card};
use crate::ui::theme::symbols;
use crate::ui::{
    blank_line, divider, format_rating, header, hint, print, prompt_select, short_id, single_line,
    table, truncate, Column, UiContext,
};

pub fn handle_cards(ctx: &AppContext, args: &CardsArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let store = ctx.open_store()?;
    let mut indexer = CarouselIndexer::from_store(&store);

    if !indexer.is_empty() {
        open_cursor(&store, &mut indexer, args)?;
    }

    let interactive = !args.no_input && !ui_ctx.mode.is_json() && ui_ctx.is_interactive();
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&cards_json(&indexer, args.radius))?);
        return Ok(());
    }
    if indexer.is_empty() {
        if !ctx.quiet() && ui_ctx.mode.is_pretty() {
            print(&ui_ctx, "No entries yet.");
            print(&ui_ctx, &hint(&ui_ctx, "daybook add -m \"...\""));
        }
        return Ok(());
    }
    if interactive {
        return browse(&ui_ctx, &mut indexer);
    }

    if ui_ctx.mode.is_pretty() && !ctx.quiet() {
        let context = format!(
            "{} of {}",
            indexer.cursor().map_or(0, |c| c + 1),
            indexer.len()
        );
        print(&ui_ctx, &header(&ui_ctx, "cards", Some(&context)));
        blank_line(&ui_ctx);
    }
    print_window(&ui_ctx, &indexer, args.radius);
    Ok(())
}

fn open_cursor(
    store: &EntryStore<FileStore>,
    indexer: &mut CarouselIndexer,
    args: &CardsArgs,
) -> anyhow::Result<()> {
    if let Some(input) = args.from.as_deref() {
        let id = resolve_entry_id(store, input)?;
        let opened = store
            .find(&id)
            .and_then(|(date_key, _)| indexer.open_at(&date_key, &id));
        if opened.is_none() {
            return Err(CliError::not_found(
                format!("Entry not found: {}", input),
                "Hint: Run `daybook cards --no-input` to list entry IDs.",
            )
            .into());
        }
    } else if let Some(value) = args.date.as_deref() {
        let date_key = parse_date_key(value)?;
        if indexer.open_at_date(&date_key).is_none() {
            return Err(CliError::not_found(
                format!("No entries on {}", date_key),
                "Hint: Run `daybook dates` to see days with entries.",
            )
            .into());
        }
    } else {
        indexer.open_index(0);
    }
    Ok(())
}

fn print_window(ui: &UiContext, indexer: &CarouselIndexer, radius: usize) {
    let cursor = symbols::CURSOR.get(ui.unicode);
    let rows: Vec<Vec<String>> = indexer
        .window(radius)
        .iter()
        .map(|slot| {
            let entry = &slot.entry.entry;
            if ui.mode.is_pretty() {
                let marker = if slot.offset == 0 { cursor } else { "" };
                vec![
                    marker.to_string(),
                    format!("{}/{}", slot.index + 1, indexer.len()),
                    entry.date_key.to_string(),
                    short_id(&entry.id),
                    format_rating(entry.rating),
                    truncate(&single_line(&entry.description), 40),
                ]
            } else {
                vec![
                    slot.offset.to_string(),
                    slot.index.to_string(),
                    entry.date_key.to_string(),
                    entry.id.clone(),
                    format_rating(entry.rating),
                    single_line(&entry.description),
                ]
            }
        })
        .collect();

    let columns = [
        Column::new(""),
        Column::right("#"),
        Column::new("Date"),
        Column::new("ID"),
        Column::right("Rating"),
        Column::new("Entry").max_width(48),
    ];
    print(ui, &table(ui, &columns, &rows));
}

fn browse(ui: &UiContext, indexer: &mut CarouselIndexer) -> anyhow::Result<()> {
    loop {
        let Some(current) = indexer.current() else {
            return Ok(());
        };
        let position = indexer.cursor().map(|c| (c, indexer.len()));
        print(ui, &divider(ui));
        print_entry_card(ui, &current.entry, position);
        blank_line(ui);

        let mut actions: Vec<(&str, Action)> = Vec::with_capacity(3);
        if indexer.has_next() {
            actions.push(("Next", Action::Next));
        }
        if indexer.has_prev() {
            actions.push(("Previous", Action::Prev));
        }
        actions.push(("Quit", Action::Quit));

        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let choice = prompt_select(ui, "Card", &labels, 0)?;
        match actions.get(choice).map(|(_, action)| *action) {
            Some(Action::Next) => {
                indexer.next();
            }
            Some(Action::Prev) => {
                indexer.prev();
            }
            Some(Action::Quit) | None => return Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Prev,
    Quit,
}
