use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{end_of_month, strip_time};
use crate::{Instant, OPEN_BOUND, ParseError, RANGE_SEPARATOR, prelude::*};

/// Caller-supplied rule marking individual days as unselectable.
///
/// It is only ever called with midnight instants.
pub type ExclusionPredicate = dyn Fn(&Instant) -> bool;

/// How much of an instant a range check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Calendar date only; both sides are truncated to midnight.
    Date,
    /// Full instant down to the minute.
    Minute,
}

/// Inclusive bounds on selectable instants. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}{RANGE_SEPARATOR}{}", "bound_text(*min)", "bound_text(*max)")]
pub struct DateRange {
    min: Option<Instant>,
    max: Option<Instant>,
}

fn bound_text(bound: Option<Instant>) -> String {
    bound.map_or_else(|| OPEN_BOUND.to_owned(), |b| b.to_string())
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Minimum is after maximum.
    #[error("Invalid date range: min ({min}) is after max ({max})")]
    InvalidRange { min: Instant, max: Instant },

    /// Error parsing a bound.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a range, rejecting `min > max`.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if both bounds are present and min > max.
    pub fn new(min: Option<Instant>, max: Option<Instant>) -> Result<Self, RangeError> {
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            return Err(RangeError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A range with neither bound.
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    pub const fn min(&self) -> Option<Instant> {
        self.min
    }

    pub const fn max(&self) -> Option<Instant> {
        self.max
    }

    /// Whether `instant` lies inside the range, both ends inclusive.
    pub fn allows(&self, instant: Instant, precision: Precision) -> bool {
        let cut = |i: Instant| match precision {
            Precision::Date => strip_time(i),
            Precision::Minute => i,
        };
        let value = cut(instant);
        self.min.is_none_or(|min| value >= cut(min)) && self.max.is_none_or(|max| value <= cut(max))
    }

    /// Whether `day` can be picked: not excluded and inside the range by date.
    pub fn day_allowed(&self, day: Instant, exclude: Option<&ExclusionPredicate>) -> bool {
        let day = strip_time(day);
        if exclude.is_some_and(|excluded| excluded(&day)) {
            return false;
        }
        self.allows(day, Precision::Date)
    }

    /// Whether any day of the month intersects the range.
    ///
    /// Exclusions are not consulted, so an open month can still have every
    /// single day disabled.
    pub fn month_has_open_day(&self, year: u16, month: u8) -> bool {
        let Ok(first) = Instant::date(year, month, 1) else {
            return false;
        };
        self.intersects(first, end_of_month(first))
    }

    /// Whether any day of the year intersects the range.
    pub fn year_has_open_day(&self, year: u16) -> bool {
        self.min.is_none_or(|min| year >= min.year()) && self.max.is_none_or(|max| year <= max.year())
    }

    /// Nearest instant inside the range.
    pub fn clamp(&self, instant: Instant) -> Instant {
        match (self.min, self.max) {
            (Some(min), _) if instant < min => min,
            (_, Some(max)) if instant > max => max,
            _ => instant,
        }
    }

    /// Day-level intersection of `[first, last]` with the range.
    fn intersects(&self, first: Instant, last: Instant) -> bool {
        self.min.is_none_or(|min| last >= strip_time(min)) && self.max.is_none_or(|max| first <= strip_time(max))
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    /// Parses `min/max`; either side may be `..` (or empty) for an open bound.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (min_str, max_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                Self::new(parse_bound(min_str)?, parse_bound(max_str)?)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

fn parse_bound(s: &str) -> Result<Option<Instant>, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == OPEN_BOUND {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
