//! Timestamps and their canonical text form.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC instant, used for `created_at` and `date_joined`.
pub type Timestamp = DateTime<Utc>;

#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Whole seconds since the Unix epoch; instants before it clamp to zero.
#[must_use]
pub fn unix_seconds(ts: Timestamp) -> u64 {
    u64::try_from(ts.timestamp()).unwrap_or_default()
}

/// RFC 3339 in UTC with exactly nine fractional digits.
///
/// Fixed width, so comparing two encoded strings orders them like the
/// instants themselves, and decoding gives back the exact instant.
#[must_use]
pub fn to_canonical(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse any RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `text` is not RFC 3339.
pub fn parse_canonical(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text).map(|ts| ts.to_utc())
}
