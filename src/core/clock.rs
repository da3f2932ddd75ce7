use crate::core::Clock;
use crate::utils::error::{Result, StatusError};
use chrono::{Local, NaiveDateTime, NaiveTime};

/// Local wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Today's date (local) at the given `HH:MM`.
    pub fn today_at(time: &str) -> Result<Self> {
        let time = parse_hh_mm(time)?;
        let today = Local::now().date_naive();
        Ok(Self::new(today.and_time(time)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

pub fn parse_hh_mm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| {
        StatusError::InvalidConfigValueError {
            field: "at".to_string(),
            value: value.to_string(),
            reason: format!("expected HH:MM ({})", e),
        }
    })
}
