use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Month, Weekday};

/// Language used for month and weekday names.
///
/// Parsed leniently from a language tag: only the primary subtag matters and
/// anything unknown falls back to English. The locale never changes grid
/// layout or comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
    Es,
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November",
    "December",
];
const MONTHS_DE: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober", "November",
    "Dezember",
];
const MONTHS_FR: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre", "octobre", "novembre",
    "décembre",
];
const MONTHS_ES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre", "octubre", "noviembre",
    "diciembre",
];

// Sunday first, indexed by `Weekday::sunday_index`
const WEEKDAYS_EN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const WEEKDAYS_DE: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];
const WEEKDAYS_FR: [&str; 7] = ["di", "lu", "ma", "me", "je", "ve", "sa"];
const WEEKDAYS_ES: [&str; 7] = ["do", "lu", "ma", "mi", "ju", "vi", "sá"];

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "de" => Self::De,
            "fr" => Self::Fr,
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    pub fn month_name(self, month: Month) -> &'static str {
        let names = match self {
            Self::En => &MONTHS_EN,
            Self::De => &MONTHS_DE,
            Self::Fr => &MONTHS_FR,
            Self::Es => &MONTHS_ES,
        };
        names[usize::from(month.index0())]
    }

    pub fn weekday_short(self, weekday: Weekday) -> &'static str {
        let names = match self {
            Self::En => &WEEKDAYS_EN,
            Self::De => &WEEKDAYS_DE,
            Self::Fr => &WEEKDAYS_FR,
            Self::Es => &WEEKDAYS_ES,
        };
        names[usize::from(weekday.sunday_index())]
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_owned()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
