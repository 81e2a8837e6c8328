use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::configuration::SchedulePolicy;
use crate::types::Booking;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bookings file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("bookings file encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence collaborator for the booking list.
///
/// `load` is fail-soft: implementations log and return an empty list instead
/// of propagating read errors. `save` replaces the whole collection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    async fn load(&self) -> Vec<Booking>;
    async fn save(&self, bookings: Vec<Booking>) -> Result<(), StoreError>;
}

/// Drops bookings whose session has concluded: anything dated before today,
/// and today's bookings once the retention hour has passed. Pure filter; the
/// caller decides whether to persist the result.
pub fn purge(
    bookings: Vec<Booking>,
    now: DateTime<FixedOffset>,
    policy: &SchedulePolicy,
) -> Vec<Booking> {
    let today = now.date_naive();
    let hour = now.hour();
    bookings
        .into_iter()
        .filter(|booking| {
            booking.game_date > today
                || (booking.game_date == today && hour < policy.retention_hour)
        })
        .collect()
}

/// Case-insensitive lookup of an existing booking for `name` on `game_date`.
pub fn find_duplicate<'a>(
    bookings: &'a [Booking],
    name: &str,
    game_date: NaiveDate,
) -> Option<&'a Booking> {
    let needle = name.trim().to_lowercase();
    bookings
        .iter()
        .find(|booking| booking.game_date == game_date && booking.name.to_lowercase() == needle)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutils::{booking_named, booking_on, local};

    #[test]
    fn purge_drops_past_dates_and_keeps_future_ones() {
        let bookings = vec![
            booking_on(2025, 8, 20), // yesterday
            booking_on(2025, 8, 21), // today
            booking_on(2025, 8, 22), // tomorrow
        ];
        let kept = purge(bookings, local(2025, 8, 21, 8, 0), &SchedulePolicy::default());
        let dates: Vec<String> = kept.iter().map(|b| b.game_date.to_string()).collect();
        assert_eq!(dates, vec!["2025-08-21", "2025-08-22"]);
    }

    #[test_case::test_case(11, true; "same day before retention hour")]
    #[test_case::test_case(12, false; "same day at retention hour")]
    #[test_case::test_case(15, false; "same day afternoon")]
    fn purge_retention_hour_rules_the_session_day(hour: u32, kept: bool) {
        let bookings = vec![booking_on(2025, 8, 21)];
        let remaining = purge(bookings, local(2025, 8, 21, hour, 0), &SchedulePolicy::default());
        assert_eq!(!remaining.is_empty(), kept);
    }

    #[test]
    fn purge_is_idempotent() {
        let bookings = vec![
            booking_on(2025, 8, 19),
            booking_on(2025, 8, 21),
            booking_on(2025, 8, 25),
        ];
        let now = local(2025, 8, 21, 13, 0);
        let policy = SchedulePolicy::default();
        let once = purge(bookings, now, &policy);
        let twice = purge(once.clone(), now, &policy);
        assert_eq!(once, twice);
    }

    #[test]
    fn purge_of_nothing_is_nothing() {
        let kept = purge(Vec::new(), local(2025, 8, 21, 8, 0), &SchedulePolicy::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn duplicate_match_ignores_case() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
        let bookings = vec![booking_named("Alice", date)];
        assert!(find_duplicate(&bookings, "alice", date).is_some());
        assert!(find_duplicate(&bookings, "ALICE", date).is_some());
        assert!(find_duplicate(&bookings, "  Alice  ", date).is_some());
    }

    #[test]
    fn duplicate_match_requires_the_same_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 22).unwrap();
        let other = chrono::NaiveDate::from_ymd_opt(2025, 8, 25).unwrap();
        let bookings = vec![booking_named("Alice", date)];
        assert!(find_duplicate(&bookings, "Alice", other).is_none());
        assert!(find_duplicate(&bookings, "Bob", date).is_none());
    }
}
