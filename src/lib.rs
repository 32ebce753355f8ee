//! Range-constrained date and date-time selection for calendar pickers.
//!
//! The crate is the engine behind a date or date-time picker widget: calendar
//! arithmetic, range and exclusion checks, the day grid, the draft/commit
//! state machine and the conversion of committed values to and from their
//! external form. Rendering is left to the host.

mod calendar;
mod codec;
mod config;
mod consts;
mod grid;
mod locale;
mod picker;
mod prelude;
mod range;
mod types;

#[cfg(test)]
mod test_utils;

pub use calendar::{
    Clock, FixedClock, SystemClock, add_months, end_of_month, start_of_month, strip_time, weekday,
    weekday_index,
};
pub use codec::{ExternalValue, ValueEncoding, decode, display, encode};
pub use config::{ConfigError, PickerConfig, PickerMode};
pub use consts::*;
pub use grid::{DayCell, YearWindow, build_day_grid, build_year_window, weekday_labels};
pub use locale::Locale;
pub use picker::{Commit, Draft, Event, GridCell, Picker, PickerState, Session, Transition};
pub use range::{DateRange, ExclusionPredicate, Precision, RangeError};
pub use types::{Day, Hour, Minute, MinuteStep, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::str::FromStr;

/// A timezone-naive point in time at minute precision.
///
/// Ordering compares calendar fields from year down to minute, which is the
/// same as chronological order for naive values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(
    fmt = "{:04}-{:02}-{:02}T{:02}:{:02}",
    "year.get()",
    "month.get()",
    "day.get()",
    "hour.get()",
    "minute.get()"
)]
pub struct Instant {
    year:   Year,
    month:  Month,
    day:    Day,
    hour:   Hour,
    minute: Minute,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid hour: {} (must be 0-{})", "_0", MAX_HOUR)]
    InvalidHour(u8),
    #[display(fmt = "Invalid minute: {} (must be 0-{})", "_0", MAX_MINUTE)]
    InvalidMinute(u8),
    #[display(fmt = "Invalid minute step: {} (must be 1-{})", "_0", MINUTES_PER_HOUR)]
    InvalidMinuteStep(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl Instant {
    /// Assembles an instant from already validated parts.
    pub const fn from_parts(year: Year, month: Month, day: Day, hour: Hour, minute: Minute) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Creates an instant from raw calendar fields, validating each of them.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first field that is out of range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:   Year::new(year)?,
            month:  Month::new(month)?,
            day:    Day::new(day, year, month)?,
            hour:   Hour::new(hour)?,
            minute: Minute::new(minute)?,
        })
    }

    /// Creates a midnight instant.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first field that is out of range.
    pub fn date(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Self::new(year, month, day, 0, 0)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn hour_typed(&self) -> Hour {
        self.hour
    }

    pub const fn minute_typed(&self) -> Minute {
        self.minute
    }

    /// Same date, time truncated to midnight.
    pub const fn date_part(&self) -> Self {
        self.with_time(Hour::MIDNIGHT, Minute::ZERO)
    }

    /// Whether both instants fall on the same calendar day.
    pub const fn same_date(&self, other: &Self) -> bool {
        self.year.get() == other.year.get()
            && self.month.get() == other.month.get()
            && self.day.get() == other.day.get()
    }

    pub const fn with_time(&self, hour: Hour, minute: Minute) -> Self {
        Self {
            hour,
            minute,
            ..*self
        }
    }

    pub const fn with_hour(&self, hour: Hour) -> Self {
        Self { hour, ..*self }
    }

    pub const fn with_minute(&self, minute: Minute) -> Self {
        Self { minute, ..*self }
    }

    /// Moves to another day of the same month, keeping the time of day.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the month has no such day.
    pub fn with_day(&self, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            day: Day::new(day, self.year.get(), self.month.get())?,
            ..*self
        })
    }

    /// Text form of the calendar date alone, `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        format!(
            "{:04}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year.get(),
            self.month.get(),
            self.day.get()
        )
    }
}

impl FromStr for Instant {
    type Err = ParseError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` and `YYYY-MM-DDTHH:MM:SS`,
    /// with a space allowed in place of the `T`. Seconds are validated and dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (date_str, time_str) = match trimmed.split_once([DATE_TIME_SEPARATOR, ' ']) {
            Some((date, time)) => (date, Some(time)),
            None => (trimmed, None),
        };

        let parts: Vec<&str> = date_str.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {date_str}"
            )));
        };
        let year = Self::parse_u16(year)?;
        let month = Self::parse_u8(month)?;
        let day = Self::parse_u8(day)?;

        let (hour, minute) = match time_str {
            Some(time) => Self::parse_time(time)?,
            None => (0, 0),
        };

        Self::new(year, month, day, hour, minute)
    }
}

impl Instant {
    /// Helper to parse u16 with better error messages
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.trim()
            .parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_time(s: &str) -> Result<(u8, u8), ParseError> {
        let parts: Vec<&str> = s.split(TIME_SEPARATOR).collect();
        match parts.as_slice() {
            [hour, minute] => Ok((Self::parse_u8(hour)?, Self::parse_u8(minute)?)),
            [hour, minute, second] => {
                // Fractional seconds are tolerated; precision stops at the minute
                let whole = second.split('.').next().unwrap_or_default();
                if Self::parse_u8(whole)? > MAX_MINUTE {
                    return Err(ParseError::InvalidFormat(s.to_owned()));
                }
                Ok((Self::parse_u8(hour)?, Self::parse_u8(minute)?))
            },
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected HH{TIME_SEPARATOR}MM, found {s}"
            ))),
        }
    }
}

impl From<Instant> for NaiveDate {
    /// Drops the time of day.
    fn from(value: Instant) -> Self {
        // Every Instant is a valid Gregorian date, so the fallback is unreachable
        Self::from_ymd_opt(
            i32::from(value.year()),
            u32::from(value.month()),
            u32::from(value.day()),
        )
        .unwrap_or_default()
    }
}

impl From<Instant> for NaiveDateTime {
    fn from(value: Instant) -> Self {
        NaiveDate::from(value)
            .and_hms_opt(u32::from(value.hour()), u32::from(value.minute()), 0)
            .unwrap_or_default()
    }
}

impl TryFrom<NaiveDate> for Instant {
    type Error = ParseError;

    /// Midnight of `value`.
    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::try_from(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl TryFrom<NaiveDateTime> for Instant {
    type Error = ParseError;

    /// Drops seconds and sub-second precision.
    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| ParseError::InvalidYear(0))?;
        // chrono guarantees month/day/hour/minute ranges, so the casts cannot truncate
        Self::new(
            year,
            value.month() as u8,
            value.day() as u8,
            value.hour() as u8,
            value.minute() as u8,
        )
    }
}

impl serde::Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
