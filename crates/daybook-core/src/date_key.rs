//! Canonical date keys and display strings.
//!
//! A [`DateKey`] identifies one calendar day. Its string form sorts in
//! chronological order under plain byte comparison, for every date chrono
//! can represent:
//!
//! | Years        | Encoding                 | Example (`2024-03-01`, `-44-03-15`, `12000-01-01`) |
//! |--------------|--------------------------|-----------------------------------------------------|
//! | `< 0`        | `-` + `999999 + year`    | `-999955-03-15`                                     |
//! | `0..=9999`   | `YYYY`                   | `2024-03-01`                                        |
//! | `> 9999`     | `~` + six-digit year     | `~012000-01-01`                                     |
//!
//! `-` sorts before every digit and `~` after, so the three classes never
//! interleave; inside a class every key has the same width.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, Result};

const NEGATIVE_PREFIX: char = '-';
const FAR_FUTURE_PREFIX: char = '~';
const NEGATIVE_OFFSET: i32 = 999_999;
const PLAIN_YEAR_MAX: i32 = 9999;

/// Canonical, chronologically sortable key for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Build the key for a date.
    pub fn from_date(date: NaiveDate) -> Self {
        DateKey(encode(date))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back into a date, if it is well formed.
    pub fn date(&self) -> Option<NaiveDate> {
        from_key(&self.0)
    }

    /// Whether the key decodes to a valid date.
    pub fn is_valid(&self) -> bool {
        self.date().is_some()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey::from_date(date)
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for DateKey {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self> {
        from_key(s)
            .map(DateKey::from_date)
            .ok_or_else(|| DaybookError::InvalidInput(format!("Invalid date key: {}", s)))
    }
}

/// Map a date to its canonical key.
pub fn to_key(date: NaiveDate) -> DateKey {
    DateKey::from_date(date)
}

/// Inverse of [`to_key`]. Returns `None` for anything that is not a
/// canonical key.
pub fn from_key(key: &str) -> Option<NaiveDate> {
    let (year, rest) = if let Some(body) = key.strip_prefix(NEGATIVE_PREFIX) {
        let (digits, rest) = split_year(body, 6)?;
        let year = digits - NEGATIVE_OFFSET;
        if year >= 0 {
            return None;
        }
        (year, rest)
    } else if let Some(body) = key.strip_prefix(FAR_FUTURE_PREFIX) {
        let (year, rest) = split_year(body, 6)?;
        if year <= PLAIN_YEAR_MAX {
            return None;
        }
        (year, rest)
    } else {
        split_year(key, 4)?
    };

    let (month, day) = split_month_day(rest)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Short human-readable form, e.g. `Fri, Mar 1, 2024`.
pub fn to_display(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.format("%a"),
        date.format("%b"),
        date.day(),
        year_label(date.year())
    )
}

/// Long form used for day headers, e.g. `Friday, March 1, 2024`.
pub fn to_long_display(date: NaiveDate) -> String {
    format!(
        "{}, {} {}, {}",
        date.format("%A"),
        date.format("%B"),
        date.day(),
        year_label(date.year())
    )
}

/// Human label for an astronomical year number (`0` is 1 BC).
pub fn year_label(year: i32) -> String {
    if year >= 1 {
        year.to_string()
    } else {
        format!("{} BC", 1 - year)
    }
}

/// Parse a date typed by a user.
///
/// Accepts `YYYY-MM-DD`, signed years of any width (`-0044-03-15`,
/// `+12000-01-01`), and canonical keys.
pub fn parse_user_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    parse_signed(trimmed)
        .or_else(|| from_key(trimmed))
        .ok_or_else(|| {
            DaybookError::InvalidInput(format!(
                "Invalid date (expected YYYY-MM-DD, signed years allowed): {}",
                value
            ))
        })
}

fn encode(date: NaiveDate) -> String {
    let year = date.year();
    let (month, day) = (date.month(), date.day());
    if year < 0 {
        format!(
            "{}{:06}-{:02}-{:02}",
            NEGATIVE_PREFIX,
            NEGATIVE_OFFSET + year,
            month,
            day
        )
    } else if year > PLAIN_YEAR_MAX {
        format!("{}{:06}-{:02}-{:02}", FAR_FUTURE_PREFIX, year, month, day)
    } else {
        format!("{:04}-{:02}-{:02}", year, month, day)
    }
}

fn split_year(body: &str, width: usize) -> Option<(i32, &str)> {
    if body.len() < width || !body.is_char_boundary(width) {
        return None;
    }
    let (digits, rest) = body.split_at(width);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, rest))
}

fn split_month_day(rest: &str) -> Option<(u32, u32)> {
    let bytes = rest.as_bytes();
    if bytes.len() != 6 || bytes[0] != b'-' || bytes[3] != b'-' {
        return None;
    }
    let month = &rest[1..3];
    let day = &rest[4..6];
    if !month.bytes().chain(day.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((month.parse().ok()?, day.parse().ok()?))
}

fn parse_signed(value: &str) -> Option<NaiveDate> {
    let (negative, body) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };
    let mut parts = body.splitn(3, '-');
    let year_part = parts.next()?;
    let month_part = parts.next()?;
    let day_part = parts.next()?;
    if year_part.is_empty() || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude: i32 = year_part.parse().ok()?;
    let year = if negative { -magnitude } else { magnitude };
    let month: u32 = month_part.parse().ok()?;
    let day: u32 = day_part.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
