use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use uuid::Uuid;

use crate::clock::Clock;
use crate::store::{BookingStore, StoreError};
use crate::types::Booking;

/// A wall-clock instant in the service offset (UTC+8).
pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

pub fn booking_named(name: &str, game_date: NaiveDate) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        name: name.to_string(),
        game_date,
        game_day_name: game_date.weekday().to_string(),
        game_date_string: format!("{}/{}", game_date.month(), game_date.day()),
        game_time: "09:00-12:00".to_string(),
        is_member: false,
        created_at: local(2025, 8, 1, 8, 0),
    }
}

pub fn booking_on(year: i32, month: u32, day: u32) -> Booking {
    booking_named("Player", NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

/// A clock pinned to one instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

pub struct RecordingStoreInner {
    pub save_fails: AtomicBool,
    pub calls_to_load: AtomicU64,
    pub calls_to_save: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
}

/// In-memory store double for server tests. Cloning shares the backing
/// list, so a test can seed and inspect what the handlers persisted.
#[derive(Clone)]
pub struct RecordingStore(pub Arc<RecordingStoreInner>);

impl RecordingStore {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(bookings: Vec<Booking>) -> Self {
        Self(Arc::new(RecordingStoreInner {
            save_fails: AtomicBool::new(false),
            calls_to_load: AtomicU64::default(),
            calls_to_save: AtomicU64::default(),
            bookings: Mutex::new(bookings),
        }))
    }

    pub fn snapshot(&self) -> Vec<Booking> {
        self.0.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingStore for RecordingStore {
    async fn load(&self) -> Vec<Booking> {
        self.0.calls_to_load.fetch_add(1, Ordering::SeqCst);
        self.0.bookings.lock().unwrap().clone()
    }

    async fn save(&self, bookings: Vec<Booking>) -> Result<(), StoreError> {
        self.0.calls_to_save.fetch_add(1, Ordering::SeqCst);
        if self.0.save_fails.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "supposed to fail",
            )));
        }
        *self.0.bookings.lock().unwrap() = bookings;
        Ok(())
    }
}
