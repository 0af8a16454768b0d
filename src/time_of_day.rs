//! Wall-clock times and the shift timeline.
//!
//! A [`TimeOfDay`] is a minute-of-day value. Shift boundaries may use `24:00`,
//! and shifts that run past midnight (`20:00 - 08:00`) are laid out on one
//! monotone timeline by [`ShiftWindow`]: everything after midnight is moved to
//! the "next day" range (`>= 24:00`) so that plain ordering by minutes keeps
//! working for the extractor and the resolver.
//!
//! ```text
//!   day shift      08:00 ─────────────────────── 20:00
//!   night shift    20:00 ──── 24:00 ──── 32:00 (displayed as 08:00)
//! ```

use crate::error::{Error, Result};
use chrono::{NaiveTime, TimeDelta, Timelike};
use std::fmt;
use std::str::FromStr;

pub(crate) const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time with minute granularity, ordered by minute of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };
    pub const END_OF_DAY: TimeOfDay = TimeOfDay { minutes: MINUTES_PER_DAY };

    /// Build a time from hour and minute. `24:00` is the only accepted value
    /// with hour 24.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 || hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }
        Some(TimeOfDay { minutes: hour * 60 + minute })
    }

    /// Parse `H:MM` or `HH:MM`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidTime { input: input.to_string(), reason };

        let caps = regex!(r"^\s*(\d{1,2}):(\d{2})\s*$").captures(input).ok_or_else(|| invalid("expected HH:MM"))?;
        let hour: u16 = caps[1].parse().map_err(|_| invalid("expected HH:MM"))?;
        let minute: u16 = caps[2].parse().map_err(|_| invalid("expected HH:MM"))?;

        if minute >= 60 {
            return Err(invalid("minute out of range"));
        }
        TimeOfDay::from_hm(hour, minute).ok_or_else(|| invalid("hour out of range"))
    }

    /// Minutes since midnight of the shift's first day.
    pub fn minutes(self) -> u16 {
        self.minutes
    }

    /// Whether this time was moved onto the day after the shift started.
    pub fn is_next_day(self) -> bool {
        self.minutes > MINUTES_PER_DAY
    }

    /// Wall-clock time as `chrono::NaiveTime`. `24:00` and midnight on the
    /// next day both map to `00:00`.
    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::MIN + TimeDelta::minutes(i64::from(self.wrapped()))
    }

    pub(crate) fn next_day(self) -> Self {
        TimeOfDay { minutes: self.minutes + MINUTES_PER_DAY }
    }

    fn wrapped(self) -> u16 {
        self.minutes % MINUTES_PER_DAY
    }
}

impl From<NaiveTime> for TimeOfDay {
    /// Seconds are truncated.
    fn from(time: NaiveTime) -> Self {
        TimeOfDay { minutes: (time.hour() * 60 + time.minute()) as u16 }
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TimeOfDay::parse(s)
    }
}

/// Times on the next day are shown wrapped (`25:30` as `01:30`). Minute 1440
/// is shown as `24:00` whether it came from a shift end or from a next-day
/// `00:00`; use [`TimeOfDay::to_naive_time`] for the wall clock.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.minutes > MINUTES_PER_DAY { self.minutes - MINUTES_PER_DAY } else { self.minutes };
        write!(f, "{:02}:{:02}", shown / 60, shown % 60)
    }
}

/// The `[start, end]` span of one shift on a monotone timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl ShiftWindow {
    /// An `end` at or before `start` means the shift runs past midnight; a
    /// shift with `start == end` lasts 24 hours.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        let end = if end <= start { end.next_day() } else { end };
        ShiftWindow { start, end }
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn is_overnight(&self) -> bool {
        self.end.minutes > MINUTES_PER_DAY
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }

    /// Place a clock time read from an annotation onto the shift timeline.
    pub fn anchor(&self, time: TimeOfDay) -> TimeOfDay {
        if self.is_overnight() && time < self.start { time.next_day() } else { time }
    }

    /// Move an anchored time that lies outside the window onto the nearest
    /// boundary, measured around the clock.
    pub fn clamp(&self, time: TimeOfDay) -> TimeOfDay {
        if self.contains(time) {
            return time;
        }
        let day = MINUTES_PER_DAY;
        let after_end = (time.wrapped() + day - self.end.wrapped()) % day;
        let before_start = (self.start.wrapped() + day - time.wrapped()) % day;
        if after_end <= before_start { self.end } else { self.start }
    }
}
