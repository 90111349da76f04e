//! Shared helpers for date/time parsing and formatting.
//!
//! The backend emits both offset-qualified RFC 3339 strings and naive
//! ISO 8601 timestamps, so parsing accepts either and keeps wall-clock time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a backend timestamp, keeping its local wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Time of day as `HH:MM`, `--:--` when absent or unparsable
pub fn format_clock_time(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Calendar date as `YYYY-MM-DD`, falling back to the raw value
pub fn format_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Long date such as `Saturday, June 28, 2025 at 05:00`
pub fn format_long_date(value: &str) -> String {
    parse_timestamp(value)
        .map(|t| t.format("%A, %B %-d, %Y at %H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Normalize user input for a planned date into the wire format.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` (what a datetime picker yields)
/// and full timestamps.
pub fn normalize_planned_date(value: &str) -> Option<String> {
    parse_timestamp(value).map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let t = parse_timestamp("2025-06-28T05:07:00-07:00").unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "05:07");
    }

    #[test]
    fn test_parse_naive_timestamp() {
        assert!(parse_timestamp("2025-06-28T05:00:00").is_some());
        assert!(parse_timestamp("2025-06-28T05:00:00.123456").is_some());
        assert!(parse_timestamp("2025-06-28").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time(Some("2025-06-28T13:45:00")), "13:45");
        assert_eq!(format_clock_time(None), "--:--");
        assert_eq!(format_clock_time(Some("garbage")), "--:--");
    }

    #[test]
    fn test_format_dates() {
        assert_eq!(format_date("2025-06-28T05:00:00Z"), "2025-06-28");
        assert_eq!(
            format_long_date("2025-06-28T05:00:00"),
            "Saturday, June 28, 2025 at 05:00"
        );
    }

    #[test]
    fn test_normalize_planned_date() {
        assert_eq!(
            normalize_planned_date("2025-06-28T05:00").as_deref(),
            Some("2025-06-28T05:00:00")
        );
        assert_eq!(
            normalize_planned_date("2025-06-28").as_deref(),
            Some("2025-06-28T00:00:00")
        );
        assert!(normalize_planned_date("June 28").is_none());
    }
}
