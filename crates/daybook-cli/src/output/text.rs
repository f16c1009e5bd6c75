//! Text and table output formatting.

use chrono::NaiveDate;

use daybook_core::date_key::year_label;
use daybook_core::timeline::MonthBlock;
use daybook_core::Entry;

use crate::ui::format::{center, pad_right};
use crate::ui::theme::{styled, styles, symbols};
use crate::ui::{format_rating, short_id, single_line, stars, truncate, UiContext};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL_WIDTH: usize = 3;

/// Rating cell: stars plus the numeric value, e.g. `****+ 4.5`.
pub fn rating_text(ui: &UiContext, rating: f64) -> String {
    let bar = styled(&stars(rating, ui.unicode), styles::star(), ui.color);
    format!("{} {}", bar, format_rating(rating))
}

/// Table rows for a list of entries.
pub fn entry_rows(ui: &UiContext, entries: &[Entry]) -> Vec<Vec<String>> {
    let text_width = ui.width.saturating_sub(40).max(20);
    entries
        .iter()
        .map(|entry| {
            if ui.mode.is_pretty() {
                vec![
                    short_id(&entry.id),
                    rating_text(ui, entry.rating),
                    entry.categories.join(", "),
                    truncate(&single_line(&entry.description), text_width),
                ]
            } else {
                vec![
                    entry.id.clone(),
                    format_rating(entry.rating),
                    entry.categories.join(","),
                    single_line(&entry.description),
                ]
            }
        })
        .collect()
}

/// Print one entry as a card.
pub fn print_entry_card(ui: &UiContext, entry: &Entry, position: Option<(usize, usize)>) {
    if !ui.mode.is_pretty() {
        println!("id={}", entry.id);
        println!("date_key={}", entry.date_key);
        println!("date={}", entry.date);
        println!("rating={}", format_rating(entry.rating));
        println!("categories={}", entry.categories.join(","));
        if entry.has_image() {
            println!("img_url={}", entry.img_url);
        }
        println!("{}", entry.description);
        return;
    }

    let title = styled(&entry.date, styles::bold(), ui.color);
    match position {
        Some((index, total)) => {
            let counter = styled(&format!("{}/{}", index + 1, total), styles::dim(), ui.color);
            println!("{}  {}", title, counter);
        }
        None => println!("{}", title),
    }
    println!("{}", rating_text(ui, entry.rating));
    if !entry.categories.is_empty() {
        let tags: Vec<String> = entry
            .categories
            .iter()
            .map(|c| styled(&format!("[{}]", c), styles::info(), ui.color))
            .collect();
        println!("{}", tags.join(" "));
    }
    println!();
    println!("{}", entry.description);
    if entry.has_image() {
        println!();
        println!("{}", styled(&entry.img_url, styles::dim(), ui.color));
    }
    println!(
        "{}",
        styled(&format!("id {}", entry.id), styles::dim(), ui.color)
    );
}

/// Render a month block as a Sunday-first grid. Days with entries carry a
/// marker; today is highlighted.
pub fn render_month(ui: &UiContext, block: &MonthBlock, today: NaiveDate) -> String {
    let width = CELL_WIDTH * 7;
    let mut lines = Vec::with_capacity(8);

    let title = center(&block.month().label(), width);
    lines.push(styled(title.trim_end(), styles::bold(), ui.color));
    lines.push(
        WEEKDAY_HEADER
            .iter()
            .map(|d| pad_right(d, CELL_WIDTH))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    let marker = symbols::ENTRY_DOT.get(ui.unicode);
    let mut counts = block.entry_counts.iter();
    for (row, week) in block.grid.weeks().into_iter().enumerate() {
        let gap = if row == 0 { block.grid.leading_gap() } else { 0 };
        let mut line = " ".repeat(CELL_WIDTH * gap);
        for (cell, count) in week.iter().zip(counts.by_ref()) {
            if !cell.in_month {
                line.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            }
            let day = format!("{:>2}", chrono::Datelike::day(&cell.date));
            let day = if cell.date == today {
                styled(&day, styles::today(), ui.color)
            } else {
                day
            };
            line.push_str(&day);
            line.push_str(if *count > 0 { marker } else { " " });
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Plain rendering of a month: a header line plus one line per day with
/// entries.
pub fn render_month_plain(block: &MonthBlock) -> String {
    let month = block.month();
    let mut lines = vec![format!(
        "month={}\tentries={}",
        month.label(),
        block.total_entries()
    )];
    for (cell, count) in block.grid.cells.iter().zip(&block.entry_counts) {
        if cell.in_month && *count > 0 {
            lines.push(format!("{}\t{}", cell.key, count));
        }
    }
    lines.join("\n")
}

/// One row of the year picker.
pub fn year_row(ui: &UiContext, year: i32, selected: i32) -> String {
    let label = year_label(year);
    if !ui.mode.is_pretty() {
        return format!("{}\t{}", year, label);
    }
    if year == selected {
        let cursor = symbols::CURSOR.get(ui.unicode);
        format!("{} {}", cursor, styled(&label, styles::bold(), ui.color))
    } else {
        format!("  {}", label)
    }
}
