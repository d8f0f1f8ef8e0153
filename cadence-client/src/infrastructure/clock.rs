use chrono::{Local, NaiveDateTime};

/// Source of the current local wall-clock time.
///
/// Injected wherever countdown/completion labels are computed, so tests
/// can pin the moment.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The real local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let at = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap().and_hms_opt(8, 0, 0).unwrap();

        assert_eq!(FixedClock(at).now(), at);
    }
}
