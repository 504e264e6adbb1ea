//! Timestamp helpers
//!
//! Order timestamps (`creationtime`, `endtime`) arrive as epoch seconds,
//! usually as strings.

use chrono::{DateTime, Utc};

/// Parse an epoch-seconds value such as `"1700000000"`.
///
/// Values above 10^11 are taken as milliseconds. Empty or non-numeric input
/// yields `None`.
pub fn parse_epoch(raw: &str) -> Option<DateTime<Utc>> {
    let ts: i64 = raw.trim().parse().ok()?;
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}

/// [`parse_epoch`] over an optional field.
pub fn parse_epoch_opt(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_epoch)
}
