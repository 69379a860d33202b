//! Parsing helpers for datetimes, dates, timezones and profile labels.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use nutrilens_core::DateKey;

/// Parse a datetime string (ISO-8601 or YYYY-MM-DD).
pub fn parse_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let naive = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid date value: {}", value))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
    }

    Err(anyhow::anyhow!(
        "Invalid date/time (expected ISO-8601 or YYYY-MM-DD): {}",
        value
    ))
}

pub fn parse_date_key(value: &str) -> anyhow::Result<DateKey> {
    DateKey::from_str(value.trim())
        .map_err(|_| anyhow::anyhow!("Invalid date (expected YYYY-MM-DD): {}", value))
}

/// Parse an IANA timezone name such as `Europe/Berlin`.
pub fn parse_timezone(value: &str) -> anyhow::Result<Tz> {
    value.trim().parse::<Tz>().map_err(|_| {
        anyhow::anyhow!(
            "Unknown timezone: {}\nHint: Use an IANA name such as UTC or America/New_York.",
            value
        )
    })
}

/// Parse a profile label (gender, activity level, goal, theme) with a
/// field name in the error.
pub fn parse_label<T>(field: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("Invalid {}: {}", field, e))
}
