/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Last hour of a day
pub const MAX_HOUR: u8 = 23;
/// Last minute of an hour
pub const MAX_MINUTE: u8 = 59;
/// Minutes in one hour
pub const MINUTES_PER_HOUR: u8 = 60;
/// Hours in one day
pub const HOURS_PER_DAY: u8 = 24;
/// Columns of the day grid
pub const DAYS_PER_WEEK: u8 = 7;

/// Minute granularity when none is configured
pub const DEFAULT_MINUTE_STEP: u8 = 1;
/// Years shown on each open side of the year list
pub const DEFAULT_YEAR_SPREAD: u16 = 50;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
/// Separator between the date and time parts (ISO 8601)
pub const DATE_TIME_SEPARATOR: char = 'T';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
/// Marker for an unbounded side of a range (ISO 8601-2 open interval)
pub const OPEN_BOUND: &str = "..";
