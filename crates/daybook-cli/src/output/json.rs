//! JSON output formatting.

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use daybook_core::carousel::CarouselIndexer;
use daybook_core::date_key::{to_long_display, year_label};
use daybook_core::timeline::{
    MonthBlock, NavigationKind, NavigationPlan, ScrollTarget, YearList, YearScroll,
};
use daybook_core::{to_display, DateKey, Entry, Month};

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &Entry) -> Value {
    json!({
        "id": entry.id,
        "date_key": entry.date_key,
        "date": entry.date,
        "description": entry.description,
        "rating": entry.rating,
        "categories": entry.categories,
        "img_url": entry.img_url,
    })
}

/// One day and its entries, in stored order.
pub fn day_json(date_key: &DateKey, date: NaiveDate, entries: &[Entry]) -> Value {
    json!({
        "date_key": date_key,
        "date": to_display(date),
        "long_date": to_long_display(date),
        "count": entries.len(),
        "entries": entries.iter().map(entry_json).collect::<Vec<_>>(),
    })
}

/// Summary row for a day that has entries.
pub fn date_summary_json(date_key: &DateKey, count: usize) -> Value {
    json!({
        "date_key": date_key,
        "date": date_key.date().map(to_display),
        "count": count,
    })
}

/// The carousel cursor and the cards around it.
pub fn cards_json(indexer: &CarouselIndexer, radius: usize) -> Value {
    let cards: Vec<Value> = indexer
        .window(radius)
        .iter()
        .map(|slot| {
            json!({
                "offset": slot.offset,
                "index": slot.index,
                "entry_index": slot.entry.entry_index,
                "sibling_count": slot.entry.sibling_count,
                "entry": entry_json(&slot.entry.entry),
            })
        })
        .collect();

    json!({
        "total": indexer.len(),
        "cursor": indexer.cursor(),
        "has_prev": indexer.has_prev(),
        "has_next": indexer.has_next(),
        "cards": cards,
    })
}

/// A month block with its entry-bearing days.
pub fn month_json(block: &MonthBlock, today: NaiveDate) -> Value {
    let month = block.month();
    let days: Vec<Value> = block
        .grid
        .cells
        .iter()
        .zip(&block.entry_counts)
        .filter(|(cell, count)| cell.in_month && **count > 0)
        .map(|(cell, count)| {
            json!({
                "date_key": cell.key,
                "day": cell.date.day(),
                "count": count,
            })
        })
        .collect();

    json!({
        "year": month.year,
        "month": month.month,
        "label": month.label(),
        "contains_today": month.contains(today),
        "total_entries": block.total_entries(),
        "days": days,
    })
}

/// Navigation result for the calendar command.
pub fn navigation_json(plan: &NavigationPlan) -> Value {
    let scroll_to = match &plan.scroll_to {
        ScrollTarget::Month(month) => json!({ "month": month_key(*month) }),
        ScrollTarget::Day(key) => json!({ "day": key }),
    };
    json!({
        "kind": navigation_kind(plan.kind),
        "target": to_display(plan.target),
        "scroll_to": scroll_to,
        "rebuilt": plan.rebuilt,
        "settle_ms": plan.settle_after.as_millis() as u64,
    })
}

fn navigation_kind(kind: NavigationKind) -> &'static str {
    match kind {
        NavigationKind::Today => "today",
        NavigationKind::Jump => "jump",
        NavigationKind::MonthStep => "month_step",
        NavigationKind::YearStep => "year_step",
    }
}

/// Calendar view: anchor, window bounds, and the months shown.
pub fn calendar_json(
    anchor: Month,
    window: (Month, Month),
    navigation: Option<&NavigationPlan>,
    blocks: &[&MonthBlock],
    today: NaiveDate,
) -> Value {
    json!({
        "anchor": month_key(anchor),
        "anchor_label": anchor.label(),
        "window": {
            "first": month_key(window.0),
            "last": month_key(window.1),
        },
        "navigation": navigation.map(navigation_json),
        "months": blocks.iter().map(|b| month_json(b, today)).collect::<Vec<_>>(),
    })
}

/// Year picker rows around `selected`.
pub fn years_json(
    list: &YearList,
    selected: i32,
    rows: &[i32],
    scroll: Option<&YearScroll>,
) -> Value {
    json!({
        "first": list.first(),
        "last": list.last(),
        "len": list.len(),
        "selected": selected,
        "selected_offset_px": list.offset_of(selected),
        "scroll": scroll.map(|s| json!({
            "prepended": s.prepended,
            "appended": s.appended,
            "scroll_adjust_px": s.scroll_adjust_px,
        })),
        "rows": rows
            .iter()
            .map(|year| json!({ "year": year, "label": year_label(*year) }))
            .collect::<Vec<_>>(),
    })
}

/// Storage key and display forms of a date.
pub fn key_json(date: NaiveDate, key: &DateKey) -> Value {
    json!({
        "key": key,
        "display": to_display(date),
        "long_display": to_long_display(date),
        "year_label": year_label(date.year()),
    })
}

/// `YYYY-MM` style identifier for a month, signed for BC years.
pub fn month_key(month: Month) -> String {
    if month.year < 0 {
        format!("-{:04}-{:02}", -(month.year as i64), month.month)
    } else {
        format!("{:04}-{:02}", month.year, month.month)
    }
}
