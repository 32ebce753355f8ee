//! Conversion between committed values and their external representation.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::PickerMode;
use crate::locale::Locale;
use crate::{Instant, TIME_SEPARATOR};

/// Which form committed values take when handed to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueEncoding {
    /// A `chrono::NaiveDate` for date pickers, a `chrono::NaiveDateTime` otherwise.
    Normalized,
    /// ISO 8601 text: `YYYY-MM-DD` for dates, `YYYY-MM-DDTHH:MM` for date-times.
    #[default]
    Text,
}

/// A value as the host stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ExternalValue {
    #[default]
    Absent,
    Date(NaiveDate),
    Normalized(NaiveDateTime),
    Text(String),
}

impl From<NaiveDate> for ExternalValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ExternalValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Normalized(value)
    }
}

impl From<String> for ExternalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ExternalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl<T: Into<Self>> From<Option<T>> for ExternalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Encodes a committed value. Date pickers never carry a time component.
pub fn encode(value: Option<Instant>, encoding: ValueEncoding, mode: PickerMode) -> ExternalValue {
    let Some(value) = value.map(|v| mode.normalize(v)) else {
        return ExternalValue::Absent;
    };
    match (encoding, mode) {
        (ValueEncoding::Normalized, PickerMode::Date) => ExternalValue::Date(value.into()),
        (ValueEncoding::Normalized, PickerMode::DateTime) => ExternalValue::Normalized(value.into()),
        (ValueEncoding::Text, PickerMode::Date) => ExternalValue::Text(value.date_string()),
        (ValueEncoding::Text, PickerMode::DateTime) => ExternalValue::Text(value.to_string()),
    }
}

/// Decodes a host value, accepting either form regardless of the configured
/// encoding. Anything unparsable is treated as absent.
pub fn decode(value: &ExternalValue, mode: PickerMode) -> Option<Instant> {
    let decoded = match value {
        ExternalValue::Absent => return None,
        ExternalValue::Date(day) => Instant::try_from(*day),
        ExternalValue::Normalized(naive) => Instant::try_from(*naive),
        ExternalValue::Text(text) if text.trim().is_empty() => return None,
        ExternalValue::Text(text) => text.parse(),
    };
    decoded
        .inspect_err(|e| tracing::debug!(event = "codec.decode.invalid", value = ?value, error = %e))
        .ok()
        .map(|v| mode.normalize(v))
}

/// Human-readable form of a committed value; empty when absent.
///
/// Only presentation: the stored value is unaffected by the locale.
pub fn display(value: Option<Instant>, locale: Locale, mode: PickerMode) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let month = locale.month_name(value.month_typed());
    let (year, day) = (value.year(), value.day());
    let date = match locale {
        Locale::En => format!("{month} {day}, {year}"),
        Locale::De => format!("{day}. {month} {year}"),
        Locale::Fr => format!("{day} {month} {year}"),
        Locale::Es => format!("{day} de {month} de {year}"),
    };
    match mode {
        PickerMode::Date => date,
        PickerMode::DateTime => format!(
            "{date} {:02}{TIME_SEPARATOR}{:02}",
            value.hour(),
            value.minute()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, instant};

    #[test]
    fn test_encode_text() {
        let value = Some(instant(2024, 1, 10, 9, 15));
        assert_eq!(
            encode(value, ValueEncoding::Text, PickerMode::DateTime),
            ExternalValue::Text("2024-01-10T09:15".to_owned())
        );
        assert_eq!(
            encode(value, ValueEncoding::Text, PickerMode::Date),
            ExternalValue::Text("2024-01-10".to_owned())
        );
        assert_eq!(encode(None, ValueEncoding::Text, PickerMode::Date), ExternalValue::Absent);
    }

    #[test]
    fn test_encode_normalized_zeroes_seconds() {
        let encoded = encode(Some(instant(2024, 1, 10, 9, 15)), ValueEncoding::Normalized, PickerMode::DateTime);
        let ExternalValue::Normalized(naive) = encoded else {
            panic!("expected a normalized value, got {encoded:?}");
        };
        assert_eq!(naive.to_string(), "2024-01-10 09:15:00");
    }

    #[test]
    fn test_encode_normalized_date_has_no_time() {
        let encoded = encode(Some(instant(2024, 1, 10, 9, 15)), ValueEncoding::Normalized, PickerMode::Date);
        let ExternalValue::Date(day) = encoded else {
            panic!("expected a calendar date, got {encoded:?}");
        };
        assert_eq!(day.to_string(), "2024-01-10");

        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(decode(&day.into(), PickerMode::Date), Some(date(2024, 1, 10)));
        assert_eq!(decode(&day.into(), PickerMode::DateTime), Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_round_trip_both_encodings() {
        let values = [
            (instant(2024, 1, 10, 9, 15), PickerMode::DateTime),
            (instant(1999, 12, 31, 23, 59), PickerMode::DateTime),
            (date(2024, 2, 29), PickerMode::Date),
            (date(1, 1, 1), PickerMode::Date),
        ];
        for (value, mode) in values {
            for encoding in [ValueEncoding::Text, ValueEncoding::Normalized] {
                let encoded = encode(Some(value), encoding, mode);
                assert_eq!(decode(&encoded, mode), Some(value), "{encoding:?} {mode:?}");
            }
        }
    }

    #[test]
    fn test_decode_tolerates_any_form() {
        let mode = PickerMode::DateTime;
        assert_eq!(decode(&"2024-01-10T09:07".into(), mode), Some(instant(2024, 1, 10, 9, 7)));
        assert_eq!(decode(&"2024-01-10 09:07:33".into(), mode), Some(instant(2024, 1, 10, 9, 7)));
        assert_eq!(decode(&"2024-01-10".into(), mode), Some(date(2024, 1, 10)));
        let naive: NaiveDateTime = instant(2024, 1, 10, 9, 7).into();
        assert_eq!(decode(&naive.into(), mode), Some(instant(2024, 1, 10, 9, 7)));
    }

    #[test]
    fn test_decode_invalid_is_absent() {
        let mode = PickerMode::DateTime;
        assert_eq!(decode(&ExternalValue::Absent, mode), None);
        assert_eq!(decode(&"".into(), mode), None);
        assert_eq!(decode(&"   ".into(), mode), None);
        assert_eq!(decode(&"not a date".into(), mode), None);
        assert_eq!(decode(&"2024-02-30".into(), mode), None);
        assert_eq!(decode(&ExternalValue::from(None::<String>), mode), None);
    }

    #[test]
    fn test_decode_in_date_mode_drops_time() {
        assert_eq!(decode(&"2024-01-10T09:07".into(), PickerMode::Date), Some(date(2024, 1, 10)));
    }

    #[test]
    fn test_display_cases() {
        let value = Some(instant(2024, 3, 5, 9, 7));
        assert_eq!(display(value, Locale::En, PickerMode::Date), "March 5, 2024");
        assert_eq!(display(value, Locale::En, PickerMode::DateTime), "March 5, 2024 09:07");
        assert_eq!(display(value, Locale::De, PickerMode::Date), "5. März 2024");
        assert_eq!(display(value, Locale::Fr, PickerMode::DateTime), "5 mars 2024 09:07");
        assert_eq!(display(value, Locale::Es, PickerMode::Date), "5 de marzo de 2024");
        assert_eq!(display(None, Locale::En, PickerMode::Date), "");
    }
}
