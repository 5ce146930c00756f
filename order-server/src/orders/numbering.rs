//! Order Numbering Service
//!
//! Human-readable order numbers, unique per restaurant per calendar day:
//! `{prefix}-{YYYYMMDD}-{seq}` with a zero-padded 4-digit sequence.
//!
//! The sequence is derived from a count of the day's existing orders, so
//! two concurrent checkouts can compute the same number. The unique index
//! on (restaurant, order_number) turns that race into a detected conflict;
//! checkout retries with a fresh count a bounded number of times.

use crate::db::repository::{OrderRepository, RepoResult};
use chrono::{DateTime, Utc};

/// Attempts before a persistent collision becomes a caller-visible error
pub const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Day window as [start, end] epoch milliseconds plus the YYYYMMDD label
///
/// Day boundaries come from server time-of-day zeroing in UTC.
pub fn day_window(at: DateTime<Utc>) -> (i64, i64, String) {
    let date = at.date_naive();
    let start = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
        .timestamp_millis();
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is always valid")
        .and_utc()
        .timestamp_millis();
    (start, end, date.format("%Y%m%d").to_string())
}

/// Pure formatting of an order number
pub fn format_order_number(prefix: &str, date_label: &str, sequence: i64) -> String {
    format!("{}-{}-{:04}", prefix, date_label, sequence)
}

/// Derive the next order number for a restaurant
///
/// Counts the restaurant's orders placed today and takes count + 1. The
/// prefix is read from restaurant settings at generation time.
pub async fn next_order_number(
    orders: &OrderRepository,
    restaurant: &str,
    prefix: &str,
    at: DateTime<Utc>,
) -> RepoResult<String> {
    let (start, end, label) = day_window(at);
    let count = orders.count_in_window(restaurant, start, end).await?;
    Ok(format_order_number(prefix, &label, count + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_zero_padding() {
        assert_eq!(format_order_number("ORD", "20260807", 1), "ORD-20260807-0001");
        assert_eq!(format_order_number("ORD", "20260807", 42), "ORD-20260807-0042");
        assert_eq!(format_order_number("GD", "20260807", 999), "GD-20260807-0999");
        // Above 4 digits the number keeps growing rather than truncating
        assert_eq!(
            format_order_number("ORD", "20260807", 12345),
            "ORD-20260807-12345"
        );
    }

    #[test]
    fn test_day_window_boundaries() {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 13, 45, 12).unwrap();
        let (start, end, label) = day_window(at);
        assert_eq!(label, "20260807");
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap().timestamp_millis()
        );
        // Inclusive end, one millisecond before the next day
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap().timestamp_millis() - 1
        );
        assert!(start <= at.timestamp_millis() && at.timestamp_millis() <= end);
    }

    #[test]
    fn test_day_window_midnight_is_inside() {
        let midnight = Utc.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        let (start, end, _) = day_window(midnight);
        assert_eq!(start, midnight.timestamp_millis());
        assert!(midnight.timestamp_millis() <= end);
    }
}
