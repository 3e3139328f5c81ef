//! Timestamp parsing and German display formatting.
//!
//! All display values use the server's local timezone.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};

const WEEKDAYS_SHORT: [&str; 7] = ["Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa.", "So."];
const WEEKDAYS_LONG: [&str; 7] = ["Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag"];
const MONTHS_SHORT: [&str; 12] = [
    "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez.",
];
const MONTHS_LONG: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September", "Oktober",
    "November", "Dezember",
];

/// Parse an upstream timestamp into local time.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (taken as local) and
/// all-day `YYYY-MM-DD` (local midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Local.from_local_datetime(&naive).earliest();
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Local.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()
}

/// `10:00`
pub fn time_of_day(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M").to_string()
}

/// `So., 18. Okt.`
pub fn short_date(dt: &DateTime<Local>) -> String {
    format!(
        "{}, {}. {}",
        WEEKDAYS_SHORT[dt.weekday().num_days_from_monday() as usize],
        dt.day(),
        MONTHS_SHORT[dt.month0() as usize]
    )
}

/// `18. Oktober 2026`
pub fn long_date(dt: &DateTime<Local>) -> String {
    format!("{}. {} {}", dt.day(), MONTHS_LONG[dt.month0() as usize], dt.year())
}

/// `Mittwoch, 21. Oktober`
pub fn weekday_date(date: NaiveDate) -> String {
    format!(
        "{}, {}. {}",
        WEEKDAYS_LONG[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS_LONG[date.month0() as usize]
    )
}

/// `10:00–11:30`, empty unless both ends are known.
pub fn time_range(start: Option<&DateTime<Local>>, end: Option<&DateTime<Local>>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{}\u{2013}{}", time_of_day(s), time_of_day(e)),
        _ => String::new(),
    }
}

/// Minutes since local midnight.
pub fn minutes_since_midnight(dt: &DateTime<Local>) -> u32 {
    dt.hour() * 60 + dt.minute()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap()
    }

    #[test]
    fn parses_rfc3339_into_the_same_instant() {
        let dt = local(2026, 10, 18, 10, 0);
        assert_eq!(parse_timestamp(&dt.to_rfc3339()), Some(dt));
        assert_eq!(parse_timestamp("  "), None);
        assert_eq!(parse_timestamp("gestern"), None);
    }

    #[test]
    fn all_day_dates_resolve_to_local_midnight() {
        assert_eq!(parse_timestamp("2026-10-18"), Some(local(2026, 10, 18, 0, 0)));
    }

    #[test]
    fn formats_german_dates() {
        let dt = local(2026, 10, 18, 9, 5);
        assert_eq!(time_of_day(&dt), "09:05");
        assert_eq!(short_date(&dt), "So., 18. Okt.");
        assert_eq!(long_date(&dt), "18. Oktober 2026");
        assert_eq!(weekday_date(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()), "Mittwoch, 21. Oktober");
        assert_eq!(minutes_since_midnight(&dt), 545);
    }

    #[test]
    fn time_range_needs_both_ends() {
        let start = local(2026, 10, 18, 10, 0);
        let end = local(2026, 10, 18, 11, 30);
        assert_eq!(time_range(Some(&start), Some(&end)), "10:00\u{2013}11:30");
        assert_eq!(time_range(Some(&start), None), "");
    }
}
