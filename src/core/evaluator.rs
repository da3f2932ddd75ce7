use crate::core::{Classification, Locale, StatusSnapshot, StoreHoursConfig, StoreStatus};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Classifies `now` against the store's operating-hours window.
///
/// Pure and total for every validated config: the same `(config, now)` always
/// yields the same status. Only the hour and minute of `now` are read.
pub fn evaluate<T: Timelike>(config: &StoreHoursConfig, now: &T) -> StoreStatus {
    let hour = now.hour();
    let minute = now.minute();

    let classification = classify(config, hour, minute);
    let minutes_until_close = match classification {
        Classification::ClosingSoon => Some(minutes_until_close(config, hour, minute)),
        _ => None,
    };

    StoreStatus {
        classification,
        minutes_until_close,
        display_text: display_text(config.locale, classification, minutes_until_close),
        indicator_color: classification.indicator_color().to_string(),
    }
}

/// Evaluates and stamps the result with the footer year of the same instant.
pub fn snapshot(config: &StoreHoursConfig, now: NaiveDateTime) -> StatusSnapshot {
    StatusSnapshot {
        status: evaluate(config, &now),
        evaluated_at: now,
        copyright_year: copyright_year(&now),
    }
}

pub fn copyright_year<T: Datelike>(now: &T) -> i32 {
    now.year()
}

fn classify(config: &StoreHoursConfig, hour: u32, minute: u32) -> Classification {
    if hour < config.open_hour || hour >= config.close_hour {
        return Classification::Closed;
    }

    match config.warn_before_close_minutes {
        Some(warn)
            if hour + 1 >= config.close_hour
                && minutes_until_close(config, hour, minute) <= warn =>
        {
            Classification::ClosingSoon
        }
        _ => Classification::Open,
    }
}

// 只在營業時間內呼叫，hour < close_hour
fn minutes_until_close(config: &StoreHoursConfig, hour: u32, minute: u32) -> u32 {
    (config.close_hour - hour - 1) * 60 + (60 - minute)
}

fn display_text(locale: Locale, classification: Classification, minutes: Option<u32>) -> String {
    match (locale, classification) {
        (Locale::Vi, Classification::Open) => "Đang mở cửa".to_string(),
        (Locale::Vi, Classification::Closed) => "Đã đóng cửa".to_string(),
        (Locale::Vi, Classification::ClosingSoon) => match minutes {
            Some(m) => format!("Sắp đóng cửa ({} phút)", m),
            None => "Sắp đóng cửa".to_string(),
        },
        (Locale::En, Classification::Open) => "Open now".to_string(),
        (Locale::En, Classification::Closed) => "Closed".to_string(),
        (Locale::En, Classification::ClosingSoon) => match minutes {
            Some(m) => format!("Closing soon ({} min)", m),
            None => "Closing soon".to_string(),
        },
    }
}
