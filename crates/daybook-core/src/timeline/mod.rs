//! Infinite month timeline.
//!
//! [`Timeline`] combines the materialized [`TimelineWindow`], the
//! [`NavigationLock`] state machine and the scroll policy:
//!
//! - While `Idle`, [`Timeline::on_scroll`] runs two independent checks. The
//!   edge check extends the window when the scroll offset is within
//!   `edge_threshold_px` of either end. The marker check finds the month
//!   block straddling a line `marker_offset_px` below the viewport top; that
//!   month becomes the anchor. When both fire, the marker month wins, so the
//!   header always names what is on screen; the edge shift applies only when
//!   the marker check leaves the anchor unchanged.
//! - Programmatic intents (`today`, `jump_to`, `step_months`, `step_years`)
//!   enter `Navigating` and return a [`NavigationPlan`]. The caller scrolls,
//!   waits `settle_after`, then calls [`Timeline::settle`] with the plan's
//!   ticket.
//!
//! The timeline never touches the entry store; it only asks it whether a day
//! has entries when building blocks.

mod config;
mod navigation;
mod window;
mod year_list;

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calendar::Month;
use crate::date_key::{to_key, DateKey};
use crate::store::{EntryStore, KeyValueStore};

pub use config::{SettleDelays, TimelineConfig, YearListConfig};
pub use navigation::{NavigationLock, NavigationState, NavigationTicket};
pub use window::{MonthBlock, TimelineWindow, WindowDelta};
pub use year_list::{YearList, YearScroll};

/// Scroll container measurements, in renderer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    /// Screen position of the viewport's top edge
    pub viewport_top: f64,
}

/// Screen bounds of one rendered month block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBounds {
    pub month: Month,
    pub top: f64,
    pub bottom: f64,
}

/// Direction of an edge-triggered extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeShift {
    Earlier,
    Later,
}

/// What a scroll event did.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollOutcome {
    /// A programmatic navigation is in flight; the event was ignored.
    Suppressed,
    Applied {
        /// Edge the viewport was near, if any
        edge: Option<EdgeShift>,
        /// Month block under the marker line, if any
        visible: Option<Month>,
        /// Anchor after the event
        anchor: Month,
        delta: WindowDelta,
    },
}

impl ScrollOutcome {
    pub fn anchor_changed(&self) -> bool {
        match self {
            ScrollOutcome::Suppressed => false,
            ScrollOutcome::Applied { delta, .. } => !delta.is_empty(),
        }
    }
}

/// Kind of programmatic navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Today,
    Jump,
    MonthStep,
    YearStep,
}

/// Where the renderer should scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Month(Month),
    Day(DateKey),
}

/// Instructions for carrying out a programmatic navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationPlan {
    pub ticket: NavigationTicket,
    pub kind: NavigationKind,
    pub target: NaiveDate,
    pub scroll_to: ScrollTarget,
    /// The window was rebuilt around the target
    pub rebuilt: bool,
    /// How long to wait before calling [`Timeline::settle`]
    pub settle_after: Duration,
}

/// Anchor, window and navigation lock for the month timeline.
#[derive(Debug)]
pub struct Timeline {
    window: TimelineWindow,
    lock: NavigationLock,
    config: TimelineConfig,
}

impl Timeline {
    pub fn new(anchor: Month, config: TimelineConfig) -> Self {
        Self {
            window: TimelineWindow::new(anchor, config.half_width, config.retain_buffer),
            lock: NavigationLock::new(),
            config,
        }
    }

    pub fn anchor(&self) -> Month {
        self.window.anchor()
    }

    pub fn window(&self) -> &TimelineWindow {
        &self.window
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn state(&self) -> NavigationState {
        self.lock.state()
    }

    pub fn is_navigating(&self) -> bool {
        self.lock.is_navigating()
    }

    /// Month blocks of the window, with entry counts read from `store`.
    pub fn blocks<S: KeyValueStore>(&self, store: &EntryStore<S>) -> Vec<MonthBlock> {
        self.window.blocks(|key| store.bucket_len(key))
    }

    /// Scroll listener. Ignored while navigating.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, blocks: &[BlockBounds]) -> ScrollOutcome {
        if self.lock.is_navigating() {
            return ScrollOutcome::Suppressed;
        }

        let edge = self.edge_for(&metrics);
        let visible = self.month_under_marker(&metrics, blocks);
        let current = self.window.anchor();

        let next = match visible {
            Some(month) if month != current => month,
            _ => match edge {
                Some(EdgeShift::Earlier) => current.add_months(-(self.config.extend_step as i32)),
                Some(EdgeShift::Later) => current.add_months(self.config.extend_step as i32),
                None => current,
            },
        };

        let delta = if next != current {
            debug!(from = %current, to = %next, ?edge, "scroll moved timeline anchor");
            self.window.shift_to(next)
        } else {
            WindowDelta::default()
        };

        ScrollOutcome::Applied {
            edge,
            visible,
            anchor: self.window.anchor(),
            delta,
        }
    }

    /// Navigate to `today`.
    pub fn today(&mut self, today: NaiveDate) -> NavigationPlan {
        let month = Month::from_date(today);
        let rebuilt = self.window.shift_to(month).rebuilt;
        self.plan(
            NavigationKind::Today,
            today,
            ScrollTarget::Day(to_key(today)),
            rebuilt,
            self.config.settle.scroll(),
        )
    }

    /// Navigate to an arbitrary date.
    ///
    /// Dates more than `jump_rebuild_years` calendar years from the anchor,
    /// or outside the current window, rebuild the window around the target
    /// and scroll to its month. Nearer dates scroll to the day cell inside
    /// the existing window without moving the anchor.
    pub fn jump_to(&mut self, target: NaiveDate) -> NavigationPlan {
        let month = Month::from_date(target);
        let year_distance = (target.year() as i64 - self.anchor().year as i64).unsigned_abs();
        let distant = year_distance > self.config.jump_rebuild_years as u64
            || !self.window.contains(month);

        if distant {
            self.window.rebuild(month);
            debug!(target = %target, "rebuilt timeline for distant jump");
            self.plan(
                NavigationKind::Jump,
                target,
                ScrollTarget::Month(month),
                true,
                self.config.settle.rebuild_jump(),
            )
        } else {
            self.plan(
                NavigationKind::Jump,
                target,
                ScrollTarget::Day(to_key(target)),
                false,
                self.config.settle.scroll(),
            )
        }
    }

    /// Move the anchor by whole months.
    pub fn step_months(&mut self, delta: i32) -> NavigationPlan {
        let month = self.anchor().add_months(delta);
        let rebuilt = self.window.shift_to(month).rebuilt;
        self.plan(
            NavigationKind::MonthStep,
            month.first_day(),
            ScrollTarget::Month(month),
            rebuilt,
            self.config.settle.month_step(),
        )
    }

    /// Move the anchor by whole years.
    pub fn step_years(&mut self, delta: i32) -> NavigationPlan {
        let month = self.anchor().add_years(delta);
        let rebuilt = self.window.shift_to(month).rebuilt;
        self.plan(
            NavigationKind::YearStep,
            month.first_day(),
            ScrollTarget::Month(month),
            rebuilt,
            self.config.settle.year_step(),
        )
    }

    /// Finish a navigation. Returns `false` if a newer navigation has
    /// started since `ticket` was issued.
    pub fn settle(&mut self, ticket: NavigationTicket) -> bool {
        self.lock.settle(ticket)
    }

    fn plan(
        &mut self,
        kind: NavigationKind,
        target: NaiveDate,
        scroll_to: ScrollTarget,
        rebuilt: bool,
        settle_after: Duration,
    ) -> NavigationPlan {
        let ticket = self.lock.begin();
        NavigationPlan {
            ticket,
            kind,
            target,
            scroll_to,
            rebuilt,
            settle_after,
        }
    }

    fn edge_for(&self, metrics: &ScrollMetrics) -> Option<EdgeShift> {
        let edge = self.config.edge_threshold_px;
        let near_top = metrics.scroll_top < edge;
        let near_bottom = metrics.scroll_height - metrics.client_height - metrics.scroll_top < edge;
        match (near_top, near_bottom) {
            (true, false) => Some(EdgeShift::Earlier),
            (false, true) => Some(EdgeShift::Later),
            _ => None,
        }
    }

    fn month_under_marker(&self, metrics: &ScrollMetrics, blocks: &[BlockBounds]) -> Option<Month> {
        let marker = metrics.viewport_top + self.config.marker_offset_px;
        blocks
            .iter()
            .rev()
            .find(|b| b.top <= marker && b.bottom >= marker)
            .map(|b| b.month)
    }
}
