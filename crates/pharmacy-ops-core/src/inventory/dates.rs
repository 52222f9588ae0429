//! Expiry date parsing.
//!
//! Dates arrive in whatever shape the source file or backend used. Parsing
//! walks an ordered fallback chain and the first format that yields a real
//! calendar date wins:
//!
//! 1. ISO-8601 (`2024-01-15`, `20240115`, `2024-01-15T10:00:00Z`)
//! 2. Common free-form layouts (`01/15/2024`, `2024/01/15`, `Jan 15 2024`, RFC 2822)
//! 3. Day-first split on `/` or `-` (`15/01/2024`, `15-01-2024`)
//!
//! A failed parse is reported as `None`. There is no "now" fallback here, so
//! callers can never do day arithmetic on a sentinel date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Free-form layouts tried after ISO-8601, month-first like most date constructors.
const GENERIC_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse an expiry date string.
pub fn parse_expiry(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    parse_iso(s)
        .or_else(|| parse_generic(s))
        .or_else(|| parse_day_first(s))
}

/// Signed calendar-day difference `date - today`.
pub fn days_between(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    ISO_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn parse_generic(s: &str) -> Option<NaiveDate> {
    GENERIC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc2822(s).ok().map(|dt| dt.date_naive()))
}

fn parse_day_first(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split(['/', '-']).collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].trim().parse().ok()?;
    let month: u32 = parts[1].trim().parse().ok()?;
    let year: i32 = parts[2].trim().parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}
