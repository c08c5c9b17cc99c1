use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

/// Parse a UTC timestamp as found in poll exports.
/// Accepts RFC 3339 as well as the space-separated form with an optional
/// trailing " UTC" marker (e.g. "2023-01-25 18:13:22.47922 UTC").
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim().trim_end_matches(" UTC").trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Parse a local time-of-day ("HH:MM:SS" or "HH:MM").
pub fn parse_local_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return Some(t);
    }
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Some(t);
    }
    None
}
