use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_WEEK, DEFAULT_MINUTE_STEP, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MAX_YEAR, MINUTES_PER_HOUR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU8, NonZeroU16};

/// A year value guaranteed to be in the range `1..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    pub const MIN: Self = Self(NonZeroU16::MIN);

    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

/// A calendar month, 1-based (`1` is January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub const JANUARY: Self = Self(NonZeroU8::MIN);

    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based month index (`0` is January).
    #[inline]
    pub const fn index0(self) -> u8 {
        self.0.get() - 1
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

/// A day of month, validated against its year and month on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        match days_in_month(year, month) {
            Some(last) if value <= last => Ok(Self(non_zero)),
            _ => Err(invalid),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // No year/month context here, so only the upper bound of any month applies
        let non_zero = NonZeroU8::new(value)
            .filter(|d| d.get() <= DAYS_IN_MONTH[1])
            .ok_or(ParseError::InvalidDay {
                month: 0,
                day: value,
                year: 0,
            })?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

/// Hour of day, `0..=23`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(u8);

impl Hour {
    pub const MIDNIGHT: Self = Self(0);

    /// # Errors
    /// Returns `ParseError::InvalidHour` if the value is > 23.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_HOUR {
            return Err(ParseError::InvalidHour(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Hour {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0
    }
}

/// Minute of hour, `0..=59`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    pub const ZERO: Self = Self(0);

    /// # Errors
    /// Returns `ParseError::InvalidMinute` if the value is > 59.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        if value > MAX_MINUTE {
            return Err(ParseError::InvalidMinute(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Minute {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

/// Granularity of the selectable minutes.
///
/// The grid is `{0, step, 2*step, ...}` clipped to `0..=59`, so minute 0 is
/// always selectable. A step of 60 leaves only the full hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MinuteStep(NonZeroU8);

impl MinuteStep {
    /// # Errors
    /// Returns `ParseError::InvalidMinuteStep` if the value is 0 or > 60.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        NonZeroU8::new(value)
            .filter(|v| v.get() <= MINUTES_PER_HOUR)
            .map(Self)
            .ok_or(ParseError::InvalidMinuteStep(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Whether `minute` is a grid point.
    pub const fn contains(self, minute: Minute) -> bool {
        minute.get() % self.get() == 0
    }

    /// Largest grid point not after `minute`.
    pub const fn floor(self, minute: Minute) -> Minute {
        Minute(minute.get() - minute.get() % self.get())
    }

    /// Smallest grid point not before `minute`, or `None` when that point
    /// would fall into the next hour.
    pub const fn ceil(self, minute: Minute) -> Option<Minute> {
        let step = self.get();
        let rounded = minute.get().div_ceil(step) * step;
        if rounded > MAX_MINUTE {
            None
        } else {
            Some(Minute(rounded))
        }
    }

    /// All grid points in ascending order.
    pub fn grid(self) -> impl Iterator<Item = Minute> {
        (0..MINUTES_PER_HOUR).step_by(usize::from(self.get())).map(Minute)
    }
}

impl Default for MinuteStep {
    fn default() -> Self {
        Self(NonZeroU8::MIN.saturating_add(DEFAULT_MINUTE_STEP - 1))
    }
}

impl TryFrom<u8> for MinuteStep {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinuteStep> for u8 {
    fn from(step: MinuteStep) -> Self {
        step.0.get()
    }
}

/// Day of the week. Discriminants follow the native numbering where Sunday is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday = 0,
    #[default]
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    const ALL: [Self; DAYS_PER_WEEK as usize] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Weekday for a Sunday-based index; wraps modulo 7.
    pub const fn from_sunday_index(index: u8) -> Self {
        Self::ALL[(index % DAYS_PER_WEEK) as usize]
    }

    /// Sunday-based index, `0..=6`.
    pub const fn sunday_index(self) -> u8 {
        self as u8
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Length of the month, or `None` when `month` is not in `1..=12`.
pub const fn days_in_month(year: u16, month: u8) -> Option<u8> {
    if month == 0 || month > MAX_MONTH {
        return None;
    }
    if month == FEBRUARY && is_leap_year(year) {
        Some(FEBRUARY_DAYS_LEAP)
    } else {
        Some(DAYS_IN_MONTH[month as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(ParseError::InvalidYear(10000))));
    }

    #[test]
    fn test_month_index0() {
        let month = Month::new(1).unwrap();
        assert_eq!(month.index0(), 0);
        assert_eq!(Month::new(12).unwrap().index0(), 11);
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_day_new_valid() {
        assert!(Day::new(31, 2024, 1).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
        assert!(Day::new(0, 2024, 4).is_err());
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
        let result: Result<Day, _> = 32.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_hour_and_minute_bounds() {
        assert_eq!(Hour::new(23).unwrap().get(), 23);
        assert!(matches!(Hour::new(24), Err(ParseError::InvalidHour(24))));
        assert_eq!(Minute::new(59).unwrap().get(), 59);
        assert!(matches!(Minute::new(60), Err(ParseError::InvalidMinute(60))));
    }

    #[test]
    fn test_minute_step_validation() {
        assert!(MinuteStep::new(1).is_ok());
        assert!(MinuteStep::new(60).is_ok());
        assert!(matches!(MinuteStep::new(0), Err(ParseError::InvalidMinuteStep(0))));
        assert!(matches!(MinuteStep::new(61), Err(ParseError::InvalidMinuteStep(61))));
        assert_eq!(MinuteStep::default().get(), DEFAULT_MINUTE_STEP);
    }

    #[test]
    fn test_minute_step_rounding_cases() {
        struct TestCase {
            step:   u8,
            minute: u8,
            floor:  u8,
            ceil:   Option<u8>,
        }

        let cases = [
            TestCase { step: 15, minute: 7, floor: 0, ceil: Some(15) },
            TestCase { step: 15, minute: 15, floor: 15, ceil: Some(15) },
            TestCase { step: 15, minute: 46, floor: 45, ceil: None },
            TestCase { step: 5, minute: 0, floor: 0, ceil: Some(0) },
            TestCase { step: 7, minute: 57, floor: 56, ceil: None },
            TestCase { step: 1, minute: 59, floor: 59, ceil: Some(59) },
        ];

        for case in &cases {
            let step = MinuteStep::new(case.step).unwrap();
            let minute = Minute::new(case.minute).unwrap();
            assert_eq!(step.floor(minute).get(), case.floor, "floor {} by {}", case.minute, case.step);
            assert_eq!(
                step.ceil(minute).map(Minute::get),
                case.ceil,
                "ceil {} by {}",
                case.minute,
                case.step
            );
        }
    }

    #[test]
    fn test_minute_step_contains() {
        let step = MinuteStep::new(15).unwrap();
        assert!(step.contains(Minute::ZERO));
        assert!(step.contains(Minute::new(45).unwrap()));
        assert!(!step.contains(Minute::new(7).unwrap()));
        assert!(MinuteStep::default().contains(Minute::new(59).unwrap()));
    }

    #[test]
    fn test_minute_step_grid() {
        let grid: Vec<u8> = MinuteStep::new(15).unwrap().grid().map(Minute::get).collect();
        assert_eq!(grid, vec![0, 15, 30, 45]);

        let grid: Vec<u8> = MinuteStep::new(25).unwrap().grid().map(Minute::get).collect();
        assert_eq!(grid, vec![0, 25, 50]);

        assert_eq!(MinuteStep::new(1).unwrap().grid().count(), 60);
        assert_eq!(MinuteStep::new(60).unwrap().grid().count(), 1);
    }

    #[test]
    fn test_weekday_indices() {
        assert_eq!(Weekday::from_sunday_index(0), Weekday::Sunday);
        assert_eq!(Weekday::from_sunday_index(8), Weekday::Monday);
        assert_eq!(Weekday::Saturday.sunday_index(), 6);
        assert_eq!(Weekday::default(), Weekday::Monday);
    }

    #[test]
    fn test_serde_newtypes() {
        let step: MinuteStep = serde_json::from_str("15").unwrap();
        assert_eq!(step.get(), 15);
        assert!(serde_json::from_str::<MinuteStep>("0").is_err());

        let weekday: Weekday = serde_json::from_str(r#""sunday""#).unwrap();
        assert_eq!(weekday, Weekday::Sunday);
        assert_eq!(serde_json::to_string(&Hour::new(9).unwrap()).unwrap(), "9");
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
    }

    #[test]
    fn test_days_in_month_rejects_invalid_month() {
        assert_eq!(days_in_month(2024, 0), None);
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, u8::MAX), None);
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        for (year, leap) in [(2020, true), (2021, false), (1900, false), (2000, true), (2400, true)] {
            assert_eq!(is_leap_year(year), leap, "year {year}");
        }
    }
}
