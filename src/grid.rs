//! Day grid and year list layout.

use crate::calendar::{end_of_month, start_of_month, weekday_index};
use crate::consts::{DAYS_PER_WEEK, MAX_YEAR, MIN_YEAR};
use crate::locale::Locale;
use crate::range::DateRange;
use crate::types::Weekday;
use crate::Instant;

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCell {
    /// Padding before the 1st or after the last day of the month.
    Empty,
    Day(u8),
}

impl DayCell {
    pub const fn day(self) -> Option<u8> {
        match self {
            Self::Empty => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// Lays out `month_anchor`'s month in full weeks starting on `first_day_of_week`.
///
/// The result length is always a multiple of 7.
pub fn build_day_grid(month_anchor: Instant, first_day_of_week: Weekday) -> Vec<DayCell> {
    let first = start_of_month(month_anchor);
    let last_day = end_of_month(month_anchor).day();
    let leading = usize::from(weekday_index(first, first_day_of_week));
    let used = leading + usize::from(last_day);
    let total = used.next_multiple_of(usize::from(DAYS_PER_WEEK));

    let mut cells = Vec::with_capacity(total);
    cells.resize(leading, DayCell::Empty);
    cells.extend((1..=last_day).map(DayCell::Day));
    cells.resize(total, DayCell::Empty);
    cells
}

/// Inclusive span of years offered in the year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearWindow {
    pub start: u16,
    pub end:   u16,
}

impl YearWindow {
    pub const fn contains(&self, year: u16) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn years(&self) -> impl Iterator<Item = u16> {
        self.start..=self.end
    }
}

/// Year list bounds: exactly `[min, max]` when both bounds exist, otherwise
/// `spread` years out from whichever anchor is available.
pub fn build_year_window(range: &DateRange, now: Instant, spread: u16) -> YearWindow {
    let before = |year: u16| year.saturating_sub(spread).max(MIN_YEAR);
    let after = |year: u16| year.saturating_add(spread).min(MAX_YEAR);

    match (range.min(), range.max()) {
        (Some(min), Some(max)) => YearWindow {
            start: min.year(),
            end:   max.year(),
        },
        (Some(min), None) => YearWindow {
            start: min.year(),
            end:   after(min.year()),
        },
        (None, Some(max)) => YearWindow {
            start: before(max.year()),
            end:   max.year(),
        },
        (None, None) => YearWindow {
            start: before(now.year()),
            end:   after(now.year()),
        },
    }
}

/// Short weekday names in grid column order.
pub fn weekday_labels(locale: Locale, first_day_of_week: Weekday) -> [&'static str; 7] {
    std::array::from_fn(|column| {
        let offset = u8::try_from(column).unwrap_or_default();
        locale.weekday_short(Weekday::from_sunday_index(first_day_of_week.sunday_index() + offset))
    })
}
