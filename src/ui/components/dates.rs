use chrono::{Duration, NaiveDate, NaiveTime, SecondsFormat};

use crate::error::ValidationError;

const CALENDAR_FORMAT: &str = "%Y-%m-%d";

/// Days between issue and due date on a new invoice
pub const PAYMENT_TERM_DAYS: i64 = 30;

/// Issue and due date text for a fresh draft
pub fn default_dates(today: NaiveDate) -> (String, String) {
    let due = today + Duration::days(PAYMENT_TERM_DAYS);
    (
        today.format(CALENDAR_FORMAT).to_string(),
        due.format(CALENDAR_FORMAT).to_string(),
    )
}

/// Calendar part of a service datetime: `2024-01-15T00:00:00Z` -> `2024-01-15`
pub fn calendar_date(wire: &str) -> String {
    wire.split('T').next().unwrap_or_default().to_string()
}

pub fn parse_calendar_date(field: &'static str, text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), CALENDAR_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: text.to_string(),
        }
    })
}

/// Midnight UTC of a calendar date, in the form the service accepts
pub fn wire_datetime(field: &'static str, text: &str) -> Result<String, ValidationError> {
    let date = parse_calendar_date(field, text)?;
    Ok(date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Human form of a service datetime, e.g. `Jan 15, 2024`
pub fn display_date(wire: &str) -> String {
    match NaiveDate::parse_from_str(&calendar_date(wire), CALENDAR_FORMAT) {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) => wire.to_string(),
    }
}
