// ============================================================================
// PACKAGE BOOKING VIEWMODEL - Rental window and fixed package price
// ============================================================================
// Packages are sold at a fixed total; the dates only decide how long the car
// is out. The end date must fall at least one day after the start.
// ============================================================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PACKAGE_PRICE_RE: Regex =
        Regex::new(r"Rs\.\s*([\d,]+)").expect("package price pattern compiles");
}

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Everything the booking modal shows once both dates are picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageQuote {
    /// Earliest end date the picker should allow (`min` attribute).
    pub min_end_date: NaiveDate,
    /// Set when the chosen end was not after the start and had to be moved.
    pub adjusted_end: Option<NaiveDateTime>,
    pub duration_days: i64,
    pub duration_label: String,
    pub price_label: String,
    pub total_label: String,
}

/// Accepts `<input type="date">` and `datetime-local` values.
pub fn parse_picker_value(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Whole number in the modal's `Rs. 25,000` price label; 0 when absent.
pub fn package_price(label: &str) -> i64 {
    PACKAGE_PRICE_RE
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0)
}

/// Started days between the two instants; any part of a day counts as one.
pub fn rental_days(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let seconds = (end - start).num_seconds();
    (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

pub fn days_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// `None` until both dates are filled in.
pub fn quote(start_raw: &str, end_raw: &str, price_label: &str, currency: &str) -> Option<PackageQuote> {
    let start = parse_picker_value(start_raw)?;
    let mut end = parse_picker_value(end_raw)?;

    let next_day = start + Duration::days(1);
    let adjusted_end = if end <= start {
        end = next_day;
        Some(next_day)
    } else {
        None
    };

    let duration_days = rental_days(start, end);
    let price = package_price(price_label);
    let price_label = format!("{} {}.00", currency, price);

    Some(PackageQuote {
        min_end_date: next_day.date(),
        adjusted_end,
        duration_days,
        duration_label: days_label(duration_days),
        total_label: price_label.clone(),
        price_label,
    })
}
