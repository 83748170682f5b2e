//! Clock-time strings to minutes since midnight and back.

use chrono::{NaiveTime, Timelike};

/// Parses `"HH:MM"` or `"HH:MM:SS"` into minutes since midnight.
///
/// Missing or blank input is `None`. Anything else yields a value: an hour
/// or minute fragment that is not plain digits counts as 0, and seconds
/// are ignored. No upper bound is enforced.
pub fn parse_clock(text: Option<&str>) -> Option<u32> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }

    let mut parts = text.split(':');
    let hours = coerce(parts.next());
    let minutes = coerce(parts.next());
    Some(hours.saturating_mul(60).saturating_add(minutes))
}

fn coerce(fragment: Option<&str>) -> u32 {
    let Some(fragment) = fragment.map(str::trim) else {
        return 0;
    };
    if fragment.is_empty() || !fragment.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    fragment.parse().unwrap_or(0)
}

/// Strict parser for user-supplied window bounds: `"H:MM"`, `"HH:MM"`,
/// plain minutes since midnight, or `"24:00"` for end of day.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let text = text.trim();
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }
    if text == "24:00" {
        return Some(24 * 60);
    }
    NaiveTime::parse_from_str(text, "%H:%M")
        .ok()
        .map(|time| time.hour() * 60 + time.minute())
}

/// Formats minutes since midnight as `H:MM` (hour not padded).
pub fn format_clock(minute: u32) -> String {
    format!("{}:{:02}", minute / 60, minute % 60)
}

/// First five characters of a raw time string, so `"09:30:00"` shows as `"09:30"`.
pub fn clip_display(raw: Option<&str>) -> String {
    raw.unwrap_or_default().chars().take(5).collect()
}
