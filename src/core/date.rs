use crate::utils::error::DateError;
use chrono::{NaiveDate, NaiveDateTime};

/// Canonical display form, e.g. `05 Feb, 2026`.
pub const DISPLAY_FORMAT: &str = "%d %b, %Y";

/// Formats the order page has been seen to use, tried in order.
/// The boolean marks formats carrying a time of day.
pub const KNOWN_FORMATS: [(&str, bool); 8] = [
    ("%d %b %Y", false),
    ("%d %B %Y", false),
    ("%d %b, %Y", false),
    ("%d %B, %Y", false),
    ("%d %b %Y %H:%M", true),
    ("%d %B %Y %H:%M", true),
    ("%Y/%m/%d", false),
    ("%Y-%m-%d", false),
];

pub fn parse_flexible(date_str: &str) -> Option<NaiveDate> {
    KNOWN_FORMATS.iter().find_map(|(fmt, has_time)| {
        if *has_time {
            NaiveDateTime::parse_from_str(date_str, fmt)
                .ok()
                .map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(date_str, fmt).ok()
        }
    })
}

/// Takes the raw text of the date section, e.g. `19 Jan 2026 - 10:00`,
/// and returns it in display form.
pub fn normalize_order_date(raw: &str) -> Result<String, DateError> {
    let candidate = raw
        .trim()
        .split(" - ")
        .next()
        .unwrap_or_default()
        .trim();

    parse_flexible(candidate)
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
        .ok_or_else(|| DateError::Unrecognized(candidate.to_string()))
}
