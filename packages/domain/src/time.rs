//! Timestamps for locally created messages and their display.
//!
//! The backend sends either RFC 3339 strings or naive ISO timestamps in UTC
//! (`2025-03-01T10:00:00.123456`). Both are accepted; anything else is shown
//! as-is.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Current time as RFC 3339, used for optimistic messages.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

fn parse(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// `HH:MM` in the given timezone.
pub fn clock_time_in<Tz>(ts: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse(ts) {
        Some(dt) => dt.with_timezone(tz).format("%H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// `HH:MM` in the local timezone.
pub fn clock_time(ts: &str) -> String {
    clock_time_in(ts, &Local)
}

/// `YYYY.MM.DD`, for notification and thread lists. Date-only input is
/// accepted too.
pub fn calendar_date(ts: &str) -> String {
    if let Some(dt) = parse(ts) {
        return dt.with_timezone(&Local).format("%Y.%m.%d").to_string();
    }
    match NaiveDate::parse_from_str(ts.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%Y.%m.%d").to_string(),
        Err(_) => ts.to_string(),
    }
}
