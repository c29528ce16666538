//! Display formatting for stored timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::error;

/// Layout used for every rendered timestamp, e.g. `15 January 2024 - 10:30 AM UTC`.
pub const DISPLAY_FORMAT: &str = "%-d %B %Y - %-I:%M %p UTC";

pub const UNKNOWN_TIME: &str = "Unknown time";
pub const INVALID_TIME: &str = "Invalid time";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the timestamp forms webhook payloads commonly carry.
///
/// Values without an offset are taken as UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Formats an instant with [`DISPLAY_FORMAT`].
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

/// Renders a stored timestamp for humans.
///
/// Absent or empty input yields [`UNKNOWN_TIME`]; unparsable input is logged
/// and yields [`INVALID_TIME`].
pub fn format_utc(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return UNKNOWN_TIME.to_string();
    };

    match parse(raw) {
        Some(instant) => format_instant(&instant),
        None => {
            error!(timestamp = raw, "error formatting timestamp");
            INVALID_TIME.to_string()
        }
    }
}
