//! Time utilities for agentic-crew.
//!
//! All timestamps are UTC. Records carry them as ISO-8601 strings.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::{CrewError, Result};

/// Return the current time.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp as RFC 3339 with microsecond precision.
pub fn to_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Format a timestamp for human display.
pub fn to_display(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (with offset) as well as naive
/// `YYYY-MM-DDTHH:MM:SS[.ffffff]` values, which are read as UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| CrewError::MalformedRecord(format!("invalid timestamp '{s}': {e}")))
}
