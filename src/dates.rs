//! Day-granularity date helpers.
//!
//! Everything in the picker compares dates by calendar day: a cell click
//! may carry a time-of-day, but two timestamps on the same day must be
//! treated as equal. These helpers centralize that rule, plus the lenient
//! parsing used when a bound value or config option arrives as a string.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Truncate a timestamp to midnight of its calendar day.
pub fn midnight(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Compare two timestamps by calendar day only.
///
/// Time-of-day is stripped from both operands, so two timestamps on the
/// same day compare equal regardless of their time components.
pub fn day_cmp(a: NaiveDateTime, b: NaiveDateTime) -> Ordering {
    a.date().cmp(&b.date())
}

/// True when both timestamps fall on the same calendar day.
pub fn day_eq(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    day_cmp(a, b) == Ordering::Equal
}

/// Formats accepted when a date arrives as a string.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a date string leniently.
///
/// Accepts ISO datetimes with or without a `T` separator, plain ISO
/// dates, and `MM/DD/YYYY`. Date-only inputs land at midnight.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Parse the leading integer of a string, ignoring trailing garbage.
///
/// Mirrors how loosely typed host attributes are read: `"3"` and
/// `"3 panels"` both yield 3, `"abc"` yields nothing.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .last()?;

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
