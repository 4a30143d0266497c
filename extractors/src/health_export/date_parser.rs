use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse a timestamp as written in the export, e.g. `2024-02-15 10:30:00 -0500`.
///
/// The first space (between date and time) is normalized to `T`. Strings that
/// are already RFC 3339 are accepted as well. Anything else yields `None`.
pub fn parse_health_date(date_str: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let date_str = date_str?.trim();
    if date_str.is_empty() {
        return None;
    }

    let normalized = date_str.replacen(' ', "T", 1);

    if let Ok(date) = DateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S %z") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(&normalized).ok()
}

/// Parse the day-granularity `dateComponents` of an activity summary.
pub fn parse_summary_date(date_str: Option<&str>) -> Option<NaiveDate> {
    let date_str = date_str?.trim();
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}
