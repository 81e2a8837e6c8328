use chrono::{FixedOffset, Weekday};

/// Weekly schedule and registration policy, fixed for the lifetime of the
/// process. Built once in `main` and passed by reference wherever a rule
/// needs it.
#[derive(Debug, Clone)]
pub struct SchedulePolicy {
    /// Weekdays with a session, in week order.
    pub session_days: Vec<Weekday>,
    /// Hour the session starts; same-day sign-up closes here.
    pub start_hour: u32,
    /// Same-day bookings survive the expiry purge until this hour.
    pub retention_hour: u32,
    /// Hour the evening-before walk-in window opens.
    pub window_open_hour: u32,
    /// Maximum number of bookings for one session.
    pub capacity: usize,
    /// Fixed local offset all schedule decisions are made in.
    pub utc_offset: FixedOffset,
    /// Display string for the session time, shown as-is.
    pub session_time_label: String,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            session_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
            start_hour: 9,
            retention_hour: 12,
            window_open_hour: 20,
            capacity: 17,
            utc_offset: FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid fixed offset"),
            session_time_label: "09:00-12:00".into(),
        }
    }
}

/// Fixed set of recognized member names. Lookup ignores case and surrounding
/// whitespace, matching how duplicate bookings are compared.
#[derive(Debug, Clone, Default)]
pub struct MemberRoster {
    names: Vec<String>,
}

impl MemberRoster {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.names.iter().any(|known| *known == needle)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
