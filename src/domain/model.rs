use crate::utils::error::{Result, StatusError};
use crate::utils::validation::{validate_range, Validate};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default closing-soon warning: the final clock hour before close.
pub const DEFAULT_WARN_BEFORE_CLOSE_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Locale {
    /// Tiếng Việt
    #[default]
    Vi,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Locale::Vi => "vi",
            Locale::En => "en",
        };
        f.write_str(code)
    }
}

/// Operating hours of the store, validated on construction.
///
/// The store is open during the half-open window `[open_hour, close_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHoursConfig {
    pub open_hour: u32,
    pub close_hour: u32,
    /// `None` turns the closing-soon refinement off.
    #[serde(default)]
    pub warn_before_close_minutes: Option<u32>,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for StoreHoursConfig {
    fn default() -> Self {
        Self {
            open_hour: 7,
            close_hour: 22,
            warn_before_close_minutes: Some(DEFAULT_WARN_BEFORE_CLOSE_MINUTES),
            locale: Locale::Vi,
        }
    }
}

impl StoreHoursConfig {
    /// Builds a config without the closing-soon refinement.
    pub fn new(open_hour: u32, close_hour: u32) -> Result<Self> {
        let config = Self {
            open_hour,
            close_hour,
            warn_before_close_minutes: None,
            locale: Locale::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_closing_soon_warning(mut self, minutes: u32) -> Result<Self> {
        self.warn_before_close_minutes = Some(minutes);
        self.validate()?;
        Ok(self)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn closing_soon_enabled(&self) -> bool {
        self.warn_before_close_minutes.is_some()
    }
}

impl Validate for StoreHoursConfig {
    fn validate(&self) -> Result<()> {
        validate_range("store.open_hour", self.open_hour, 0, 23)?;
        validate_range("store.close_hour", self.close_hour, 1, 24)?;

        if self.open_hour >= self.close_hour {
            return Err(StatusError::InvalidConfigValueError {
                field: "store.open_hour".to_string(),
                value: self.open_hour.to_string(),
                reason: format!("must be earlier than close_hour ({})", self.close_hour),
            });
        }

        if let Some(minutes) = self.warn_before_close_minutes {
            validate_range(
                "store.warn_before_close_minutes",
                minutes,
                1,
                DEFAULT_WARN_BEFORE_CLOSE_MINUTES,
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Open,
    ClosingSoon,
    Closed,
}

impl Classification {
    /// Badge dot color.
    pub fn indicator_color(self) -> &'static str {
        match self {
            Classification::Open => "#4caf50",
            Classification::ClosingSoon => "#ff9800",
            Classification::Closed => "#f44336",
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, Classification::Closed)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::Open => "OPEN",
            Classification::ClosingSoon => "CLOSING_SOON",
            Classification::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStatus {
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_until_close: Option<u32>,
    pub display_text: String,
    pub indicator_color: String,
}

/// One evaluation, as handed to the renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub status: StoreStatus,
    pub evaluated_at: NaiveDateTime,
    pub copyright_year: i32,
}
