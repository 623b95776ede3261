//! Calendar primitives everything else builds on. All functions take the
//! reference date explicitly and absorb malformed input instead of erroring,
//! so render paths can call them unconditionally.

use chrono::{Datelike, NaiveDate, Weekday};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored `YYYY-MM-DD` string, `None` when malformed.
pub fn parse_iso(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, ISO_FORMAT).ok()
}

/// Formats a date back into the stored `YYYY-MM-DD` shape.
pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Day offset of `target` relative to `today`, both at midnight.
///
/// Positive: target is in the past (D+N). Negative: target is upcoming (D-N).
/// Zero: target is today, or the string did not parse.
pub fn day_offset(today: NaiveDate, target: &str) -> i64 {
    match parse_iso(target) {
        Some(date) => (today - date).num_days(),
        None => 0,
    }
}

/// Absolute number of days between two dates, order-independent. Either side
/// failing to parse yields 0.
pub fn days_between(a: &str, b: &str) -> i64 {
    match (parse_iso(a), parse_iso(b)) {
        (Some(a), Some(b)) => (b - a).num_days().abs(),
        _ => 0,
    }
}

/// `"yyyy년 M월 d일"`, the display format both front ends use. Malformed
/// input is returned unchanged so the UI still shows something.
pub fn format_korean_date(date: &str) -> String {
    match parse_iso(date) {
        Some(d) => format!("{}년 {}월 {}일", d.year(), d.month(), d.day()),
        None => date.to_string(),
    }
}

/// Single-character Korean weekday, empty string when malformed.
pub fn weekday_korean(date: &str) -> &'static str {
    match parse_iso(date).map(|d| d.weekday()) {
        Some(Weekday::Sun) => "일",
        Some(Weekday::Mon) => "월",
        Some(Weekday::Tue) => "화",
        Some(Weekday::Wed) => "수",
        Some(Weekday::Thu) => "목",
        Some(Weekday::Fri) => "금",
        Some(Weekday::Sat) => "토",
        None => "",
    }
}
