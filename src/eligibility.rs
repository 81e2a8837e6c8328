use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::configuration::SchedulePolicy;
use crate::schedule::NextSession;

/// Stable machine-checkable outcome of a sign-up attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityCode {
    Member,
    SameDay,
    PreviousDayEvening,
    FullCapacity,
    GameStarted,
    TooEarly,
    WrongDay,
}

impl EligibilityCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::SameDay => "SAME_DAY",
            Self::PreviousDayEvening => "PREVIOUS_DAY_EVENING",
            Self::FullCapacity => "FULL_CAPACITY",
            Self::GameStarted => "GAME_STARTED",
            Self::TooEarly => "TOO_EARLY",
            Self::WrongDay => "WRONG_DAY",
        }
    }
}

impl std::fmt::Display for EligibilityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub allowed: bool,
    pub code: EligibilityCode,
    pub reason: String,
}

impl Decision {
    fn allow(code: EligibilityCode, reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            code,
            reason: reason.into(),
        }
    }

    fn reject(code: EligibilityCode, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            code,
            reason: reason.into(),
        }
    }
}

/// Decides whether a sign-up may be created now. Rules run in a fixed order
/// and the first match wins:
///
/// 1. a full session rejects everyone, members included;
/// 2. members pass with no day or hour restriction;
/// 3. on the session day itself, walk-ins pass only before the start hour;
/// 4. on the calendar day before the session, walk-ins pass from the window
///    open hour onward;
/// 5. every other day is out of the window.
pub fn check(
    next: &NextSession,
    booking_count: usize,
    is_member: bool,
    now: DateTime<FixedOffset>,
    policy: &SchedulePolicy,
) -> Decision {
    if booking_count >= policy.capacity {
        return Decision::reject(
            EligibilityCode::FullCapacity,
            format!("Session is full ({} players max)", policy.capacity),
        );
    }

    if is_member {
        return Decision::allow(EligibilityCode::Member, "Members can sign up any time");
    }

    if next.is_today {
        return if now.hour() < policy.start_hour {
            Decision::allow(EligibilityCode::SameDay, "Today's session has not started yet")
        } else {
            Decision::reject(
                EligibilityCode::GameStarted,
                "Today's session has already started; sign-up is closed",
            )
        };
    }

    // The walk-in window sits on the calendar day right before the session.
    let window_day = next.date.weekday().pred();
    if now.weekday() == window_day {
        return if now.hour() >= policy.window_open_hour {
            Decision::allow(
                EligibilityCode::PreviousDayEvening,
                "The walk-in window is open",
            )
        } else {
            let hours_left = policy.window_open_hour - now.hour();
            Decision::reject(
                EligibilityCode::TooEarly,
                format!(
                    "Walk-in sign-up opens at {}:00; {} hour(s) to go",
                    policy.window_open_hour, hours_left
                ),
            )
        };
    }

    Decision::reject(
        EligibilityCode::WrongDay,
        format!(
            "Walk-in sign-up opens {} at {}:00",
            window_day, policy.window_open_hour
        ),
    )
}
