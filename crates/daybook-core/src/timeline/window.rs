//! The materialized range of month blocks around the anchor.

use crate::calendar::{month_grid, Month, MonthGrid};
use crate::date_key::DateKey;

/// How the materialized range changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowDelta {
    /// Months added before the previous first block
    pub prepended: usize,
    /// Months added after the previous last block
    pub appended: usize,
    /// Months dropped from the front
    pub trimmed_front: usize,
    /// Months dropped from the back
    pub trimmed_back: usize,
    /// The range was discarded and built from scratch
    pub rebuilt: bool,
}

impl WindowDelta {
    pub fn is_empty(&self) -> bool {
        *self == WindowDelta::default()
    }
}

/// A contiguous run of months around an anchor.
///
/// The core range is `[anchor - half_width, anchor + half_width]`. After a
/// scroll-driven shift up to `retain_buffer` months of the previous range are
/// kept beyond the core on the side the user came from.
#[derive(Debug, Clone)]
pub struct TimelineWindow {
    anchor: Month,
    start: Month,
    end: Month,
    half_width: u32,
    retain_buffer: u32,
}

impl TimelineWindow {
    pub fn new(anchor: Month, half_width: u32, retain_buffer: u32) -> Self {
        let mut window = Self {
            anchor,
            start: anchor,
            end: anchor,
            half_width,
            retain_buffer,
        };
        window.rebuild(anchor);
        window
    }

    pub fn anchor(&self) -> Month {
        self.anchor
    }

    pub fn first(&self) -> Month {
        self.start
    }

    pub fn last(&self) -> Month {
        self.end
    }

    /// Number of materialized months.
    pub fn len(&self) -> usize {
        (self.start.months_until(self.end) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, month: Month) -> bool {
        self.start <= month && month <= self.end
    }

    /// Materialized months, oldest first.
    pub fn months(&self) -> Vec<Month> {
        (0..self.len() as i32)
            .map(|offset| self.start.add_months(offset))
            .collect()
    }

    /// Discard the range and build the core range around `anchor`.
    pub fn rebuild(&mut self, anchor: Month) -> WindowDelta {
        let (start, end) = self.core(anchor);
        self.anchor = anchor;
        self.start = start;
        self.end = end;
        WindowDelta {
            rebuilt: true,
            ..WindowDelta::default()
        }
    }

    /// Move the anchor, keeping overlapping blocks of the previous range
    /// within the retain buffer. Falls back to [`rebuild`](Self::rebuild)
    /// when the new core range does not touch the old one.
    pub fn shift_to(&mut self, anchor: Month) -> WindowDelta {
        let (core_start, core_end) = self.core(anchor);
        let touches =
            self.start <= core_end.add_months(1) && core_start <= self.end.add_months(1);
        if !touches {
            return self.rebuild(anchor);
        }

        let buffer = self.retain_buffer as i32;
        let start = core_start.min(self.start.max(core_start.add_months(-buffer)));
        let end = core_end.max(self.end.min(core_end.add_months(buffer)));

        let delta = WindowDelta {
            prepended: count(start, self.start),
            appended: count(self.end, end),
            trimmed_front: count(self.start, start),
            trimmed_back: count(end, self.end),
            rebuilt: false,
        };
        self.anchor = anchor;
        self.start = start;
        self.end = end;
        delta
    }

    /// Month grids for the materialized range with per-cell entry counts.
    /// Only in-month cells are counted.
    pub fn blocks(&self, mut entry_count: impl FnMut(&DateKey) -> usize) -> Vec<MonthBlock> {
        self.months()
            .into_iter()
            .map(|month| {
                let grid = month_grid(month);
                let entry_counts = grid
                    .cells
                    .iter()
                    .map(|cell| if cell.in_month { entry_count(&cell.key) } else { 0 })
                    .collect();
                MonthBlock { grid, entry_counts }
            })
            .collect()
    }

    fn core(&self, anchor: Month) -> (Month, Month) {
        let half = self.half_width as i32;
        (anchor.add_months(-half), anchor.add_months(half))
    }
}

/// A month grid plus entry counts aligned with its cells.
#[derive(Debug, Clone)]
pub struct MonthBlock {
    pub grid: MonthGrid,
    pub entry_counts: Vec<usize>,
}

impl MonthBlock {
    pub fn month(&self) -> Month {
        self.grid.month
    }

    pub fn total_entries(&self) -> usize {
        self.entry_counts.iter().sum()
    }
}

/// Months in `[from, to)`, or zero if `to <= from`.
fn count(from: Month, to: Month) -> usize {
    from.months_until(to).max(0) as usize
}
