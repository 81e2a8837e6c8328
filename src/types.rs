use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One confirmed sign-up for a session. Created whole, never mutated; the
/// display fields are snapshots taken at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub name: String,
    pub game_date: NaiveDate,
    pub game_day_name: String,
    pub game_date_string: String,
    pub game_time: String,
    pub is_member: bool,
    pub created_at: DateTime<FixedOffset>,
}

/// On-disk layout of the bookings file. A document without a `bookings` key
/// reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsDocument {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
