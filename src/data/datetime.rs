use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use crate::data::value::Value;

lazy_static! {
    static ref ISO_DATE_PREFIX: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("ISO date prefix pattern is valid");
}

/// Year-first formats accepted after the `YYYY-MM-DD` prefix check.
pub const ISO_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
];

/// Display format for date cells (month/day/year, no padding).
pub const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Parse an ISO-style date or timestamp. Timestamps with an offset
/// (e.g. `2026-02-10T22:26:28.987Z`) are converted to UTC.
pub fn parse_iso_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if !ISO_DATE_PREFIX.is_match(value) {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for &fmt in ISO_DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Whether a single cell should be shown as a date.
///
/// This is a per-cell check, evaluated each time a value is displayed;
/// nothing is remembered about the column it came from.
pub fn is_date_like(value: &Value) -> bool {
    match value {
        Value::Text(s) => parse_iso_date(s).is_some(),
        _ => false,
    }
}

/// Render a cell for a table view.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Number(v) => format!("{v}"),
        Value::Date(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
        Value::Text(s) => match parse_iso_date(s) {
            Some(dt) => dt.format(DISPLAY_DATE_FORMAT).to_string(),
            None => s.clone(),
        },
        Value::Missing => String::new(),
    }
}
