//! Unbounded year list for the year picker.

use super::config::YearListConfig;

/// Result of a scroll event on the year list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YearScroll {
    /// Years added before the first year
    pub prepended: i32,
    /// Years added after the last year
    pub appended: i32,
    /// Pixels to add to the scroll offset so the visible rows stay put.
    /// Non-zero only after a prepend.
    pub scroll_adjust_px: f64,
}

impl YearScroll {
    pub fn extended(&self) -> bool {
        self.prepended > 0 || self.appended > 0
    }
}

/// A contiguous, growable range of years (negative years included) that
/// extends by a fixed batch whenever the viewport nears either end.
#[derive(Debug, Clone)]
pub struct YearList {
    start: i32,
    end: i32,
    config: YearListConfig,
}

impl YearList {
    /// Years `center - initial_span ..= center + initial_span`.
    pub fn new(center: i32, config: YearListConfig) -> Self {
        let span = config.initial_span.max(0);
        Self {
            start: center.saturating_sub(span),
            end: center.saturating_add(span),
            config,
        }
    }

    /// Reset the list around a new center.
    pub fn recenter(&mut self, center: i32) {
        *self = Self::new(center, self.config.clone());
    }

    pub fn first(&self) -> i32 {
        self.start
    }

    pub fn last(&self) -> i32 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end as i64 - self.start as i64 + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    /// Row index of `year`, if listed.
    pub fn index_of(&self, year: i32) -> Option<usize> {
        self.contains(year)
            .then(|| (year as i64 - self.start as i64) as usize)
    }

    /// Pixel offset of the row for `year`, if listed.
    pub fn offset_of(&self, year: i32) -> Option<f64> {
        self.index_of(year)
            .map(|index| index as f64 * self.config.row_height_px)
    }

    /// Total height of the list in pixels.
    pub fn height_px(&self) -> f64 {
        self.len() as f64 * self.config.row_height_px
    }

    /// Handle a scroll event. Near the top a batch is prepended and the
    /// returned adjustment compensates for the inserted rows; near the bottom
    /// a batch is appended with no adjustment.
    pub fn on_scroll(&mut self, scroll_top: f64, client_height: f64) -> YearScroll {
        let edge = self.config.edge_threshold_px;
        let batch = self.config.batch.max(1);
        let mut outcome = YearScroll::default();

        if scroll_top < edge {
            let before = self.start;
            self.start = before.saturating_sub(batch);
            outcome.prepended = before - self.start;
            outcome.scroll_adjust_px = outcome.prepended as f64 * self.config.row_height_px;
        }

        let scroll_height = self.height_px();
        let adjusted_top = scroll_top + outcome.scroll_adjust_px;
        if scroll_height - client_height - adjusted_top < edge {
            let before = self.end;
            self.end = before.saturating_add(batch);
            outcome.appended = self.end - before;
        }

        outcome
    }
}
