//! Calendar arithmetic at day granularity.
//!
//! Everything here is a pure function of its inputs except the [`Clock`]
//! implementations, which are the only way the crate learns the current time.

use chrono::{Datelike, NaiveDate};

use crate::consts::{DAYS_PER_WEEK, MAX_MONTH, MAX_YEAR, MIN_DAY};
use crate::types::{Day, Hour, Minute, Month, Weekday, Year, days_in_month};
use crate::Instant;

/// First day of `d`'s month, at midnight.
pub fn start_of_month(d: Instant) -> Instant {
    Instant::from_parts(d.year_typed(), d.month_typed(), Day::FIRST, Hour::MIDNIGHT, Minute::ZERO)
}

/// Last day of `d`'s month, at midnight.
pub fn end_of_month(d: Instant) -> Instant {
    // The month of an Instant is always valid, so the fallback is unreachable
    days_in_month(d.year(), d.month())
        .and_then(|last| d.date_part().with_day(last).ok())
        .unwrap_or_else(|| start_of_month(d))
}

/// First day of the month `n` months away from `d`'s month.
///
/// Day of month is not preserved. Returns `None` when the target falls
/// outside the supported years.
pub fn add_months(d: Instant, n: i32) -> Option<Instant> {
    let index = i32::from(d.year()) * i32::from(MAX_MONTH) + i32::from(d.month_typed().index0()) + n;
    let year = u16::try_from(index.div_euclid(i32::from(MAX_MONTH))).ok()?;
    let month = u8::try_from(index.rem_euclid(i32::from(MAX_MONTH))).ok()? + 1;
    if year > MAX_YEAR {
        return None;
    }
    Instant::date(year, month, MIN_DAY).ok()
}

/// Truncates to midnight so that time of day never affects a date comparison.
pub const fn strip_time(d: Instant) -> Instant {
    d.date_part()
}

/// Day of the week of `d` in the proleptic Gregorian calendar.
pub fn weekday(d: Instant) -> Weekday {
    let date: NaiveDate = d.into();
    let index = u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or_default();
    Weekday::from_sunday_index(index)
}

/// Column of `d` in a week that starts on `first_day_of_week`, `0..=6`.
pub fn weekday_index(d: Instant, first_day_of_week: Weekday) -> u8 {
    (weekday(d).sunday_index() + DAYS_PER_WEEK - first_day_of_week.sunday_index()) % DAYS_PER_WEEK
}

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        let local = chrono::Local::now().naive_local();
        Instant::try_from(local).unwrap_or_else(|e| {
            tracing::warn!(event = "calendar.clock.out_of_range", error = %e);
            Instant::from_parts(Year::MIN, Month::JANUARY, Day::FIRST, Hour::MIDNIGHT, Minute::ZERO)
        })
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}
