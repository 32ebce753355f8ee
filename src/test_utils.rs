use crate::{DateRange, Instant};

pub fn instant(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Instant {
    Instant::new(year, month, day, hour, minute).expect("valid test instant")
}

pub fn date(year: u16, month: u8, day: u8) -> Instant {
    Instant::date(year, month, day).expect("valid test date")
}

pub fn range(min: Option<Instant>, max: Option<Instant>) -> DateRange {
    DateRange::new(min, max).expect("valid test range")
}
