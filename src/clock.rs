use chrono::{DateTime, FixedOffset, Utc};
#[cfg(test)]
use mockall::automock;

/// Source of "now" for every schedule decision.
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System time shifted to a fixed offset, independent of the host timezone.
#[derive(Debug, Clone)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for FixedOffsetClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn reports_wall_clock_in_the_configured_offset() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let clock = FixedOffsetClock::new(offset);

        let here = clock.now();
        let utc = Utc::now();

        assert_eq!(here.offset().local_minus_utc(), 8 * 3600);
        // Same instant, different wall clock.
        let drift = (here.with_timezone(&Utc) - utc).num_seconds().abs();
        assert!(drift < 5, "clock drifted {drift}s from Utc::now()");
        assert_eq!(
            here.hour(),
            utc.with_timezone(&offset).hour(),
            "hour must come from the shifted wall clock"
        );
    }
}
