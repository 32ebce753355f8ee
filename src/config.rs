//! Picker configuration and its validation.

use serde::{Deserialize, Serialize};

use crate::codec::ValueEncoding;
use crate::consts::DEFAULT_YEAR_SPREAD;
use crate::locale::Locale;
use crate::range::{DateRange, RangeError};
use crate::types::{MinuteStep, Weekday};
use crate::{Instant, ParseError};

/// Whether a commit needs a time of day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerMode {
    /// Picking a day commits immediately.
    #[default]
    Date,
    /// A day, then a minute; the minute pick commits.
    DateTime,
}

impl PickerMode {
    pub const fn requires_time(self) -> bool {
        matches!(self, Self::DateTime)
    }

    /// Drops the time of day in date mode.
    pub const fn normalize(self, value: Instant) -> Instant {
        match self {
            Self::Date => value.date_part(),
            Self::DateTime => value,
        }
    }
}

/// Everything a picker needs besides the exclusion predicate and the clock.
///
/// Deserializes from a partial document; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub mode:              PickerMode,
    pub range:             DateRange,
    pub minute_step:       MinuteStep,
    pub encoding:          ValueEncoding,
    pub locale:            Locale,
    pub first_day_of_week: Weekday,
    pub year_spread:       u16,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode:              PickerMode::default(),
            range:             DateRange::unbounded(),
            minute_step:       MinuteStep::default(),
            encoding:          ValueEncoding::default(),
            locale:            Locale::default(),
            first_day_of_week: Weekday::default(),
            year_spread:       DEFAULT_YEAR_SPREAD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid range: {0}")]
    Range(#[from] RangeError),

    #[error("Invalid value: {0}")]
    Value(#[from] ParseError),

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl PickerConfig {
    /// Config with the given bounds and defaults for everything else.
    ///
    /// # Errors
    /// Returns `ConfigError::Range` if `min > max`.
    pub fn new(mode: PickerMode, min: Option<Instant>, max: Option<Instant>) -> Result<Self, ConfigError> {
        Ok(Self {
            mode,
            range: DateRange::new(min, max)?,
            ..Self::default()
        })
    }

    /// # Errors
    /// Returns `ConfigError::Value` if the step is 0 or over 60.
    pub fn with_minute_step(mut self, step: u8) -> Result<Self, ConfigError> {
        self.minute_step = MinuteStep::new(step)?;
        Ok(self)
    }

    /// # Errors
    /// Returns `ConfigError::InvalidConfiguration` when the year spread is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.year_spread == 0 {
            return Err(ConfigError::InvalidConfiguration {
                message: "year_spread must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, instant, range};

    #[test]
    fn test_default_config_is_valid() {
        let config = PickerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, PickerMode::Date);
        assert_eq!(config.minute_step.get(), 1);
        assert_eq!(config.year_spread, 50);
        assert_eq!(config.first_day_of_week, Weekday::Monday);
    }

    #[test]
    fn test_zero_year_spread_is_rejected() {
        let config = PickerConfig {
            year_spread: 0,
            ..PickerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = PickerConfig::new(PickerMode::Date, Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(matches!(
            result,
            Err(ConfigError::Range(RangeError::InvalidRange { .. }))
        ));

        let config = PickerConfig::new(PickerMode::DateTime, Some(date(2024, 1, 1)), None).unwrap();
        assert_eq!(config.range.min(), Some(date(2024, 1, 1)));
        assert_eq!(config.mode, PickerMode::DateTime);
    }

    #[test]
    fn test_minute_step_builder() {
        let config = PickerConfig::default().with_minute_step(15).unwrap();
        assert_eq!(config.minute_step.get(), 15);

        let result = PickerConfig::default().with_minute_step(0);
        assert!(matches!(
            result,
            Err(ConfigError::Value(ParseError::InvalidMinuteStep(0)))
        ));
    }

    #[test]
    fn test_deserialize_partial_document() {
        let json = r#"{
            "mode": "date_time",
            "range": "2024-01-10T09:07/2024-01-20",
            "minute_step": 15,
            "locale": "de-DE"
        }"#;
        let config: PickerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.mode, PickerMode::DateTime);
        assert_eq!(config.range, range(Some(instant(2024, 1, 10, 9, 7)), Some(date(2024, 1, 20))));
        assert_eq!(config.minute_step.get(), 15);
        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.encoding, ValueEncoding::Text);
        assert_eq!(config.year_spread, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_rejects_bad_values() {
        assert!(serde_json::from_str::<PickerConfig>(r#"{"minute_step": 0}"#).is_err());
        assert!(serde_json::from_str::<PickerConfig>(r#"{"range": "2024-02-01/2024-01-01"}"#).is_err());
        assert!(serde_json::from_str::<PickerConfig>(r#"{"mode": "time"}"#).is_err());
    }

    #[test]
    fn test_mode_normalize() {
        let value = instant(2024, 1, 10, 9, 7);
        assert_eq!(PickerMode::Date.normalize(value), date(2024, 1, 10));
        assert_eq!(PickerMode::DateTime.normalize(value), value);
        assert!(PickerMode::DateTime.requires_time());
        assert!(!PickerMode::Date.requires_time());
    }
}
