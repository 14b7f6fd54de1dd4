//! Date parsing for request parameters and upstream timestamps.

use chrono::{NaiveDate, NaiveDateTime};

/// Request-side date format.
pub const DATE_SHORT: &str = "%Y-%m-%d";

/// Timestamp format used in upstream responses.
pub const DATE_LONG: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses `text` with `format`, returning `None` on any failure.
///
/// Date-only formats yield midnight so that the result can be compared
/// against regime boundaries, which carry a time component.
pub fn parse_date(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
