use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike};

use crate::configuration::SchedulePolicy;

/// The next scheduled session, derived from "now" and the weekly pattern.
/// Recomputed per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NextSession {
    pub date: NaiveDate,
    pub day_name: String,
    pub date_string: String,
    pub full_date_string: String,
    pub is_today: bool,
}

/// Computes the next session occurrence. Pure: two calls with the same `now`
/// return the same result.
///
/// Weekday arithmetic uses the Sunday=0 numbering. A session day whose start
/// hour has already passed counts as started and is skipped, so only days
/// strictly later in the week qualify before wrapping to next week.
pub fn next_session(now: DateTime<FixedOffset>, policy: &SchedulePolicy) -> NextSession {
    let today = now.weekday().num_days_from_sunday();
    let hour = now.hour();

    let is_session_day = policy
        .session_days
        .iter()
        .any(|day| day.num_days_from_sunday() == today);

    let (days_to_add, is_today) = if is_session_day && hour < policy.start_hour {
        (0, true)
    } else {
        let later_this_week = policy
            .session_days
            .iter()
            .map(|day| day.num_days_from_sunday())
            .filter(|&day| day > today)
            .min();
        match later_this_week {
            Some(day) => (day - today, false),
            None => {
                let first = policy
                    .session_days
                    .iter()
                    .map(|day| day.num_days_from_sunday())
                    .min()
                    .unwrap_or(today);
                (7 - today + first, false)
            }
        }
    };

    let date = now.date_naive() + Duration::days(i64::from(days_to_add));
    NextSession {
        date,
        day_name: date.weekday().to_string(),
        date_string: format!("{}/{}", date.month(), date.day()),
        full_date_string: date.format("%Y-%m-%d").to_string(),
        is_today,
    }
}
