//! Month arithmetic and month grids.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date_key::{to_key, year_label, DateKey};

/// Number of cells in a month grid (six weeks).
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    /// Astronomical year (`0` is 1 BC)
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
}

impl Month {
    /// Build a month, returning `None` if `month` is outside 1-12 or the
    /// year is outside chrono's range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        if *self == Self::max() {
            return NaiveDate::MAX;
        }
        let next = self.add_months(1).first_day();
        next.pred_opt().unwrap_or(next)
    }

    /// Number of days in the month.
    pub fn len_days(&self) -> u32 {
        self.last_day().day()
    }

    /// Shift by a signed number of months. Saturates at chrono's supported
    /// range.
    pub fn add_months(&self, delta: i32) -> Self {
        let index = self.index() + delta as i64;
        Self::from_index(index).unwrap_or(if delta < 0 { Self::min() } else { Self::max() })
    }

    /// Shift by a signed number of years.
    pub fn add_years(&self, delta: i32) -> Self {
        self.add_months(delta.saturating_mul(12))
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: Month) -> i64 {
        other.index() - self.index()
    }

    /// Whether `date` falls in this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Header label, e.g. `March 2024`.
    pub fn label(&self) -> String {
        let name = MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12];
        format!("{} {}", name, year_label(self.year))
    }

    /// Iterate the in-month days.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.len_days()).map(move |offset| first + Duration::days(offset as i64))
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Option<Self> {
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        let year = i32::try_from(year).ok()?;
        Self::new(year, month)
    }

    fn min() -> Self {
        Self::from_date(NaiveDate::MIN)
    }

    fn max() -> Self {
        Self::from_date(NaiveDate::MAX)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: DateKey,
    /// Whether the cell belongs to the month the grid was built for.
    /// Leading/trailing cells from neighbouring months never show entries.
    pub in_month: bool,
}

/// Six-week grid for one month, weeks starting on Sunday.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub month: Month,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Columns left empty before the first cell. Non-zero only when the
    /// lead-in days fall before the earliest representable date.
    pub fn leading_gap(&self) -> usize {
        self.cells
            .first()
            .map_or(0, |c| c.date.weekday().num_days_from_sunday() as usize)
    }

    /// Rows of up to seven cells, Sunday first. The first row is short by
    /// [`leading_gap`](Self::leading_gap).
    pub fn weeks(&self) -> Vec<&[DayCell]> {
        let head = (7 - self.leading_gap()).min(self.cells.len());
        let (first, rest) = self.cells.split_at(head);
        std::iter::once(first)
            .filter(|week| !week.is_empty())
            .chain(rest.chunks(7))
            .collect()
    }
}

/// Build the 6x7 grid for `month`, starting on the Sunday on or before the
/// first of the month. Cells outside chrono's date range are omitted.
pub fn month_grid(month: Month) -> MonthGrid {
    let first = month.first_day();
    let lead = first.weekday().num_days_from_sunday() as i64;

    let cells = (-lead..GRID_CELLS as i64 - lead)
        .filter_map(|offset| first.checked_add_signed(Duration::days(offset)))
        .map(|date| DayCell {
            date,
            key: to_key(date),
            in_month: month.contains(date),
        })
        .collect();

    MonthGrid { month, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, m: u32) -> Month {
        Month::new(year, m).unwrap()
    }

    #[test]
    fn test_add_months_crosses_year_boundaries() {
        assert_eq!(month(2024, 11).add_months(3), month(2025, 2));
        assert_eq!(month(2024, 1).add_months(-1), month(2023, 12));
        assert_eq!(month(1, 1).add_months(-13), month(-1, 12));
        assert_eq!(month(2024, 3).add_years(-2068), month(-44, 3));
    }

    #[test]
    fn test_months_until() {
        assert_eq!(month(2024, 1).months_until(month(2025, 3)), 14);
        assert_eq!(month(2025, 3).months_until(month(2024, 1)), -14);
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 13).is_none());
    }

    #[test]
    fn test_label() {
        assert_eq!(month(2024, 3).label(), "March 2024");
        assert_eq!(month(-44, 3).label(), "March 45 BC");
    }

    #[test]
    fn test_len_days_handles_leap_years() {
        assert_eq!(month(2024, 2).len_days(), 29);
        assert_eq!(month(2023, 2).len_days(), 28);
        assert_eq!(month(2024, 12).len_days(), 31);
        assert_eq!(month(2024, 3).iter_days().count(), 31);
    }

    #[test]
    fn test_month_grid_starts_on_sunday() {
        // March 1, 2024 is a Friday.
        let grid = month_grid(month(2024, 3));
        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(
            grid.cells[0].date,
            NaiveDate::from_ymd_opt(2024, 2, 25).unwrap()
        );
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.cells[5].key.as_str(), "2024-03-01");
        assert!(grid.cells[5].in_month);
        assert_eq!(grid.weeks().len(), 6);
    }

    #[test]
    fn test_last_supported_month_has_all_days() {
        let last = Month::from_date(NaiveDate::MAX);
        assert_eq!(last.month, 12);
        assert_eq!(last.last_day(), NaiveDate::MAX);
        assert_eq!(last.len_days(), 31);
        assert_eq!(last.iter_days().last(), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_month_grid_at_earliest_date() {
        let grid = month_grid(Month::from_date(NaiveDate::MIN));
        assert_eq!(grid.cells[0].date, NaiveDate::MIN);
        assert!(grid.cells.len() < GRID_CELLS);
        assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 31);

        let gap = grid.leading_gap();
        assert!(gap > 0);
        let weeks = grid.weeks();
        assert_eq!(weeks[0].len(), 7 - gap);
        assert!(weeks[1..].iter().all(|w| w.len() <= 7));
        assert_eq!(weeks.iter().map(|w| w.len()).sum::<usize>(), grid.cells.len());
    }

    #[test]
    fn test_month_grid_at_latest_date() {
        let grid = month_grid(Month::from_date(NaiveDate::MAX));
        assert_eq!(grid.leading_gap(), 0);
        assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 31);
        assert_eq!(grid.cells.last().map(|c| c.date), Some(NaiveDate::MAX));
    }

    #[test]
    fn test_month_grid_in_month_count() {
        let grid = month_grid(month(2023, 2));
        assert_eq!(grid.cells.iter().filter(|c| c.in_month).count(), 28);
    }
}
