use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::configuration::{MemberRoster, SchedulePolicy};
use crate::eligibility::{self, EligibilityCode};
use crate::schedule::{self, NextSession};
use crate::store::{self, BookingStore, StoreError};
use crate::types::Booking;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Please provide a player name")]
    EmptyName,
    #[error("{0} is already signed up for this session")]
    Duplicate(String),
    #[error("{reason}")]
    NotEligible {
        code: EligibilityCode,
        reason: String,
    },
    #[error("Booking not found")]
    NotFound,
    #[error("Could not save bookings")]
    Store(#[from] StoreError),
}

/// A successful sign-up: the stored record plus the user-facing confirmation.
#[derive(Debug, Clone)]
pub struct CreatedBooking {
    pub booking: Booking,
    pub message: String,
}

/// Ties the pure pieces together. Every flow that mutates the stored list
/// runs as one read-purge-check-write cycle under `write_lock`, so concurrent
/// requests cannot lose updates (the host may dispatch handlers in parallel).
pub struct BookingService<S, C> {
    policy: SchedulePolicy,
    roster: MemberRoster,
    store: S,
    clock: C,
    write_lock: Mutex<()>,
}

impl<S: BookingStore, C: Clock> BookingService<S, C> {
    pub fn new(policy: SchedulePolicy, roster: MemberRoster, store: S, clock: C) -> Self {
        Self {
            policy,
            roster,
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    pub fn next_session(&self) -> NextSession {
        schedule::next_session(self.clock.now(), &self.policy)
    }

    /// Current bookings with expired ones purged. A purge that removed
    /// something is written back; if that write fails the purged list is
    /// still returned and the purge simply runs again on the next request.
    pub async fn list_bookings(&self) -> Vec<Booking> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();

        let loaded = self.store.load().await;
        let before = loaded.len();
        let bookings = store::purge(loaded, now, &self.policy);

        if bookings.len() < before {
            info!(dropped = before - bookings.len(), "purged expired bookings");
            if let Err(err) = self.store.save(bookings.clone()).await {
                warn!(error = %err, "write-back after purge failed");
            }
        }
        bookings
    }

    /// The whole booking flow: validate, resolve the session, purge, reject
    /// duplicates, check eligibility, then append and persist.
    pub async fn create_booking(&self, raw_name: &str) -> Result<CreatedBooking, BookingError> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(BookingError::EmptyName);
        }

        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let next = schedule::next_session(now, &self.policy);

        let loaded = self.store.load().await;
        let mut bookings = store::purge(loaded, now, &self.policy);

        if store::find_duplicate(&bookings, name, next.date).is_some() {
            return Err(BookingError::Duplicate(name.to_string()));
        }

        let is_member = self.roster.contains(name);
        let decision = eligibility::check(&next, bookings.len(), is_member, now, &self.policy);
        if !decision.allowed {
            info!(
                player = name,
                code = %decision.code,
                "booking rejected"
            );
            return Err(BookingError::NotEligible {
                code: decision.code,
                reason: decision.reason,
            });
        }

        let booking = Booking {
            id: Uuid::new_v4(),
            name: name.to_string(),
            game_date: next.date,
            game_day_name: next.day_name.clone(),
            game_date_string: next.date_string.clone(),
            game_time: self.policy.session_time_label.clone(),
            is_member,
            created_at: now,
        };
        bookings.push(booking.clone());
        self.store.save(bookings).await?;

        info!(
            player = %booking.name,
            date = %booking.game_date,
            member = booking.is_member,
            "booking created"
        );
        let message = format!(
            "{} is signed up for {} {}",
            booking.name, next.day_name, next.date_string
        );
        Ok(CreatedBooking { booking, message })
    }

    /// Removes one booking by id. A miss leaves the store untouched.
    pub async fn cancel_booking(&self, id: Uuid) -> Result<(), BookingError> {
        let _guard = self.write_lock.lock().await;

        let mut bookings = self.store.load().await;
        let Some(position) = bookings.iter().position(|booking| booking.id == id) else {
            return Err(BookingError::NotFound);
        };
        let removed = bookings.remove(position);
        self.store.save(bookings).await?;

        info!(player = %removed.name, %id, "booking cancelled");
        Ok(())
    }
}
