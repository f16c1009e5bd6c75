use tracing::{debug, warn};

use daybook_core::timeline::{BlockBounds, ScrollMetrics, ScrollOutcome, ScrollTarget};
use daybook_core::{KeyValueStore, Month, Timeline};

use crate::app::AppContext;
use crate::cli::{CalendarAction, CalendarArgs};
use crate::constants::ANCHOR_KEY;
use crate::helpers::parse_date;
use crate::output::{calendar_json, render_month, render_month_plain};
use crate::ui::{blank_line, header, print};

/// Height of one rendered month block in the simulated layout.
const MONTH_BLOCK_PX: f64 = 360.0;
/// Viewport height in the simulated layout.
const VIEWPORT_PX: f64 = 800.0;

pub fn handle_calendar(ctx: &AppContext, args: &CalendarArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let config = ctx.config()?;
    let today = ctx.today()?;
    let mut store = ctx.open_store()?;

    let stored_anchor = load_anchor(store.backend());
    let anchor = stored_anchor.unwrap_or_else(|| Month::from_date(today));
    let mut timeline = Timeline::new(anchor, config.calendar.clone());

    let action = args.action.clone().unwrap_or(CalendarAction::Show);
    let plan = match action {
        CalendarAction::Show => None,
        CalendarAction::Next => Some(timeline.step_months(1)),
        CalendarAction::Prev => Some(timeline.step_months(-1)),
        CalendarAction::NextYear => Some(timeline.step_years(1)),
        CalendarAction::PrevYear => Some(timeline.step_years(-1)),
        CalendarAction::Today => Some(timeline.today(today)),
        CalendarAction::Jump { date } => Some(timeline.jump_to(parse_date(&date)?)),
    };

    if let Some(plan) = &plan {
        // No animation to wait for in a terminal.
        timeline.settle(plan.ticket);
        if let ScrollTarget::Day(key) = &plan.scroll_to {
            if let Some(date) = key.date() {
                land_on(&mut timeline, Month::from_date(date));
            }
        }
    }

    if stored_anchor != Some(timeline.anchor()) {
        save_anchor(store.backend_mut(), timeline.anchor())?;
    }

    let anchor = timeline.anchor();
    let span = args.months as i32;
    let (from, to) = (anchor.add_months(-span), anchor.add_months(span));
    let all_blocks = timeline.blocks(&store);
    let blocks: Vec<_> = all_blocks
        .iter()
        .filter(|b| b.month() >= from && b.month() <= to)
        .collect();

    if ui_ctx.mode.is_json() {
        let window = (timeline.window().first(), timeline.window().last());
        let output = calendar_json(anchor, window, plan.as_ref(), &blocks, today);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ui_ctx.mode.is_pretty() {
        if !ctx.quiet() {
            print(&ui_ctx, &header(&ui_ctx, "calendar", Some(&anchor.label())));
            blank_line(&ui_ctx);
        }
        for block in &blocks {
            print(&ui_ctx, &render_month(&ui_ctx, block, today));
            blank_line(&ui_ctx);
        }
    } else {
        println!("anchor={}", crate::output::month_key(anchor));
        for block in &blocks {
            println!("{}", render_month_plain(block));
        }
    }
    Ok(())
}

/// Read the persisted anchor month. Missing or unreadable values yield `None`.
pub(crate) fn load_anchor<S: KeyValueStore>(backend: &S) -> Option<Month> {
    let raw = match backend.get(ANCHOR_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(error = %err, "failed to read calendar anchor");
            return None;
        }
    };
    match serde_json::from_str::<Month>(&raw) {
        Ok(month) => Month::new(month.year, month.month),
        Err(err) => {
            warn!(error = %err, "discarding malformed calendar anchor");
            None
        }
    }
}

fn save_anchor<S: KeyValueStore>(backend: &mut S, anchor: Month) -> anyhow::Result<()> {
    let payload = serde_json::to_string(&anchor)?;
    backend
        .set(ANCHOR_KEY, &payload)
        .map_err(|e| anyhow::anyhow!("Failed to save calendar anchor: {}", e))?;
    debug!(anchor = %anchor, "saved calendar anchor");
    Ok(())
}

/// Replay the scroll that a day-targeted navigation ends with: lay the
/// window out as fixed-height blocks and put the marker line inside the
/// target month, letting the scroll listener move the anchor.
fn land_on(timeline: &mut Timeline, month: Month) -> Option<ScrollOutcome> {
    if timeline.anchor() == month || !timeline.window().contains(month) {
        return None;
    }

    let marker_offset = timeline.config().marker_offset_px;
    let height = MONTH_BLOCK_PX.max(marker_offset * 2.0);
    let months = timeline.window().months();
    let blocks: Vec<BlockBounds> = months
        .iter()
        .enumerate()
        .map(|(i, m)| BlockBounds {
            month: *m,
            top: i as f64 * height,
            bottom: (i + 1) as f64 * height,
        })
        .collect();

    let index = timeline.window().first().months_until(month) as f64;
    let scroll_top = (index * height + 1.0 - marker_offset).max(0.0);
    let metrics = ScrollMetrics {
        scroll_top,
        scroll_height: blocks.len() as f64 * height,
        client_height: VIEWPORT_PX,
        viewport_top: scroll_top,
    };
    let outcome = timeline.on_scroll(metrics, &blocks);
    debug!(?outcome, "landed on day target");
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use daybook_core::{MemoryStore, TimelineConfig};

    fn month(year: i32, m: u32) -> Month {
        Month::new(year, m).unwrap()
    }

    #[test]
    fn test_anchor_round_trip_and_bad_payload() {
        let mut backend = MemoryStore::new();
        assert_eq!(load_anchor(&backend), None);

        save_anchor(&mut backend, month(-43, 3)).unwrap();
        assert_eq!(load_anchor(&backend), Some(month(-43, 3)));

        let backend = MemoryStore::with_value(ANCHOR_KEY, "{not json");
        assert_eq!(load_anchor(&backend), None);
        let backend = MemoryStore::with_value(ANCHOR_KEY, r#"{"year":2024,"month":13}"#);
        assert_eq!(load_anchor(&backend), None);
    }

    #[test]
    fn test_near_jump_lands_on_target_month() {
        let mut timeline = Timeline::new(month(2024, 3), TimelineConfig::default());
        let plan = timeline.jump_to(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert!(!plan.rebuilt);
        assert_eq!(timeline.anchor(), month(2024, 3));

        timeline.settle(plan.ticket);
        let outcome = land_on(&mut timeline, month(2024, 5)).unwrap();
        assert!(outcome.anchor_changed());
        assert_eq!(timeline.anchor(), month(2024, 5));
    }

    #[test]
    fn test_land_on_current_anchor_is_noop() {
        let mut timeline = Timeline::new(month(2024, 3), TimelineConfig::default());
        assert!(land_on(&mut timeline, month(2024, 3)).is_none());
    }
}
