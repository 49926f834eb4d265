//! Timestamp codec for the topic wire format.
//!
//! The server emits `createdDate` as `/Date(<milliseconds>)/`; older payloads
//! use a plain `yyyy-MM-ddTHH:mm:ss` local-less timestamp. Outbound topics
//! always carry a UTC timestamp with millisecond precision.

use chrono::{DateTime, NaiveDateTime, Utc};

const JSON_DATE_PREFIX: &str = "/Date(";
const JSON_DATE_SUFFIX: &str = ")/";
const PLAIN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a `/Date(<milliseconds>)/` literal.
///
/// The milliseconds may be an integer or a decimal. Anything else, including
/// a wrong prefix or suffix, yields `None`.
pub fn parse_json_date(input: &str) -> Option<DateTime<Utc>> {
    let millis = input
        .strip_prefix(JSON_DATE_PREFIX)?
        .strip_suffix(JSON_DATE_SUFFIX)?;

    if let Ok(whole) = millis.parse::<i64>() {
        return DateTime::from_timestamp_millis(whole);
    }

    let fractional: f64 = millis.parse().ok()?;
    if !fractional.is_finite() {
        return None;
    }
    let micros = (fractional * 1000.0).round();
    if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// Parse a strict `yyyy-MM-ddTHH:mm:ss` timestamp, taking the fields as UTC.
pub fn parse_plain_datetime(input: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(input, PLAIN_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Resolve a server `createdDate` value: `/Date(..)/` first, then the plain
/// format, then `now`.
pub fn parse_created_date(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| parse_json_date(s).or_else(|| parse_plain_datetime(s)))
        .unwrap_or(now)
}

/// Render a timestamp as `yyyy-MM-ddTHH:mm:ss.SSSZ` in UTC.
pub fn format_wire_date(date: DateTime<Utc>) -> String {
    date.format(WIRE_FORMAT).to_string()
}
