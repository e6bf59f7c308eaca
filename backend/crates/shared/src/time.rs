//! ISO-8601 date helpers
//!
//! Listing filters and portfolio dates accept either a full RFC 3339
//! timestamp or a bare `YYYY-MM-DD` calendar date. Bare dates are read
//! as UTC.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `true` when `raw` is an RFC 3339 timestamp or a calendar date.
pub fn is_iso_date(raw: &str) -> bool {
    parse_start(raw).is_some()
}

/// Parse a lower bound. A bare date means midnight UTC of that day.
pub fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Parse an inclusive upper bound. A bare date covers the whole day, so
/// the bound is the last microsecond before the next midnight.
pub fn parse_end(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    let next = date.checked_add_days(Days::new(1))?;
    Some(next.and_time(NaiveTime::MIN).and_utc() - chrono::Duration::microseconds(1))
}

/// Calendar date of an ISO string, used for `date` columns.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc).date_naive())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bare_date_bounds_cover_the_day() {
        let start = parse_start("2025-03-10").unwrap();
        let end = parse_end("2025-03-10").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
        assert!(end > Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap());
        assert!(end < Utc.with_ymd_and_hms(2025, 3, 11, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_rfc3339_is_kept_exact() {
        let ts = parse_end("2025-03-10T12:30:00-03:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 3, 10, 15, 30, 0).unwrap());
    }

    #[test]
    fn test_rejects_non_dates() {
        assert!(!is_iso_date("10/03/2025"));
        assert!(!is_iso_date("2025-13-01"));
        assert!(!is_iso_date("ayer"));
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_parse_date_from_timestamp() {
        let date = parse_date("2024-12-31T23:00:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
