//! Timestamp normalization.
//!
//! Stored timestamps are always UTC in [`STORAGE_FORMAT`]. Input is ISO-8601
//! (with or without an offset, `T` or space separated) or the token `now`.
//! Values without an offset are taken to be in the local system timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::ModelError;

/// Textual format of every timestamp column.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalize a user-supplied timestamp to the storage format.
pub fn normalize_timestamp(input: &str) -> Result<String, ModelError> {
    normalize_timestamp_at(input, Utc::now())
}

/// Like [`normalize_timestamp`], with an explicit value for `now`.
pub fn normalize_timestamp_at(input: &str, now: DateTime<Utc>) -> Result<String, ModelError> {
    parse_timestamp(input, now).map(|dt| format_timestamp(&dt))
}

/// Format a UTC instant in the storage format.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(STORAGE_FORMAT).to_string()
}

/// Parse a user-supplied timestamp into a UTC instant, truncated to seconds.
pub fn parse_timestamp(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, ModelError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ModelError::invalid_timestamp(input, "empty value"));
    }
    if s.eq_ignore_ascii_case("now") {
        return Ok(truncate_seconds(now));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(truncate_seconds(dt.with_timezone(&Utc)));
    }

    // Trailing Z in the storage format itself, or a space-separated RFC 3339 value
    if let Some(body) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        if let Some(naive) = parse_naive(body) {
            return Ok(truncate_seconds(Utc.from_utc_datetime(&naive)));
        }
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(truncate_seconds(dt.with_timezone(&Utc)));
        }
    }

    let naive = parse_naive(s)
        .ok_or_else(|| ModelError::invalid_timestamp(input, "not an ISO-8601 timestamp"))?;
    let local = Local.from_local_datetime(&naive).earliest().ok_or_else(|| {
        ModelError::invalid_timestamp(input, "time does not exist in the local timezone")
    })?;
    Ok(truncate_seconds(local.with_timezone(&Utc)))
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn truncate_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
