use chrono::{NaiveDate, NaiveDateTime};

use crate::parser::types::Closure;

/// Timestamp formats tried in order. `%.f` also matches the no-fraction case.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse a free-form timestamp or date string into a calendar date.
/// Returns None for empty or unrecognizable input; never panics.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    None
}

/// Map a raw closure field to its tri-state: empty means never closed,
/// a parsable value is a closure date, anything else is unknown.
pub fn parse_closure(s: &str) -> Closure {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Closure::Open;
    }
    match parse_flexible_date(trimmed) {
        Some(d) => Closure::On(d),
        None => Closure::Unknown,
    }
}
