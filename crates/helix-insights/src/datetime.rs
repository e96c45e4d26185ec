//! Helix wire timestamps: `yyyy-MM-ddTHH:mm:ss.SSSZ`, always UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Format a date as a Helix wire timestamp with millisecond precision.
///
/// Years outside 0000-9999 are written with an explicit sign and as many
/// digits as needed (`+10000-01-01T00:00:00.000Z`).
pub fn date_to_wire_string(date: DateTime<Utc>) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Parse a Helix wire timestamp. Anything not matching the fixed pattern
/// (exactly three fractional digits, `Z` suffix) yields `None`.
pub fn wire_string_to_date(s: &str) -> Option<DateTime<Utc>> {
    let rest = s.strip_suffix('Z')?;
    let bytes = rest.as_bytes();
    let dot = bytes.len().checked_sub(4)?;
    if bytes[dot] != b'.' || !bytes[dot + 1..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(rest, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(naive.and_utc())
}
