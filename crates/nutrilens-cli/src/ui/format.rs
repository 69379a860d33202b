//! String formatting utilities for UI rendering.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a short ID from a UUID (first 8 characters).
pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Whole numbers print without decimals, anything else with one.
pub fn format_amount(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

pub fn format_kcal(value: f64) -> String {
    format!("{} kcal", format_amount(value))
}

pub fn format_grams(value: f64) -> String {
    format!("{} g", format_amount(value))
}

/// Progress percentages are clamped by the core; display them as integers.
pub fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

/// Time of day in the user's timezone.
pub fn format_time(dt: &DateTime<Utc>, tz: Tz, pretty: bool) -> String {
    if pretty {
        dt.with_timezone(&tz).format("%H:%M").to_string()
    } else {
        dt.to_rfc3339()
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}
