//! Wall-clock time helpers shared by the availability and conflict checks.
//!
//! Times are `"HH:MM"` strings measured in minutes since midnight. An
//! interval whose end is not after its start is read as crossing midnight,
//! so its end is pushed forward by one day. Nothing here errors: values
//! that cannot be read come back as `None` and the caller picks the policy.

use chrono::{Datelike, NaiveDate, Weekday};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half-open `[start, end)` interval in minutes since midnight.
///
/// `end` may exceed [`MINUTES_PER_DAY`] for overnight intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end > MINUTES_PER_DAY
    }
}

/// Parses `"HH:MM"` into minutes since midnight.
pub fn parse_clock_time(value: &str) -> Option<u32> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let hours = parse_component(hours)?;
    let minutes = parse_component(minutes)?;

    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

pub fn normalize_interval(start: &str, end: &str) -> Option<Interval> {
    let start = parse_clock_time(start)?;
    let mut end = parse_clock_time(end)?;

    if end <= start {
        end += MINUTES_PER_DAY;
    }

    Some(Interval { start, end })
}

/// Overlap test on raw `"HH:MM"` pairs.
///
/// Returns `false` when either pair cannot be normalized: an unreadable
/// booking never blocks another one.
pub fn intervals_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    match (normalize_interval(a_start, a_end), normalize_interval(b_start, b_end)) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

/// English weekday name of a calendar date, e.g. `"Monday"`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
