use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Challenge ID (unique within the backend)
pub type ChallengeId = Uuid;

/// How a report is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    /// Done / not done
    Binary,
    /// A count per period (e.g. kilometers, repetitions)
    Numeric,
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeKind::Binary => write!(f, "binary"),
            ChallengeKind::Numeric => write!(f, "numeric"),
        }
    }
}

/// Expected reporting cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

/// Errors that can occur when building a challenge
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChallengeError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Challenge ends before it starts")]
    EndsBeforeStart,
}

/// The activity contract attached to a group.
///
/// Validity dates are calendar dates with no time component. Completion is
/// derived, never stored: a challenge is completed once the current moment
/// passes the end of the local calendar day of `end_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    id: ChallengeId,
    name: String,
    kind: ChallengeKind,
    frequency: Frequency,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    reminder_enabled: bool,
    description: Option<String>,
}

/// Countdown state relative to a challenge's deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// The deadline has passed
    Completed,
    /// Time left until the end of the challenge's last day
    Remaining { days: i64, hours: i64 },
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Completed => write!(f, "completed"),
            Countdown::Remaining { days, hours } => write!(f, "{}d {}h left", days, hours),
        }
    }
}

impl Challenge {
    /// Create a new challenge with a random ID
    pub fn new(
        name: String,
        kind: ChallengeKind,
        frequency: Frequency,
    ) -> Result<Self, ChallengeError> {
        if name.trim().is_empty() {
            return Err(ChallengeError::EmptyName);
        }

        Ok(Challenge {
            id: Uuid::new_v4(),
            name,
            kind,
            frequency,
            start_date: None,
            end_date: None,
            reminder_enabled: false,
            description: None,
        })
    }

    /// Set the validity window. Both dates are inclusive calendar dates.
    pub fn with_dates(
        mut self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ChallengeError> {
        if start_date > end_date {
            return Err(ChallengeError::EndsBeforeStart);
        }
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        Ok(self)
    }

    pub fn with_reminder(mut self, enabled: bool) -> Self {
        self.reminder_enabled = enabled;
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    // ===== Getters =====

    pub fn id(&self) -> ChallengeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ChallengeKind {
        self.kind
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn reminder_enabled(&self) -> bool {
        self.reminder_enabled
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    // ===== Derived state =====

    /// The last instant of the challenge's final day (local wall time),
    /// or `None` when the challenge has no end date.
    pub fn deadline(&self) -> Option<NaiveDateTime> {
        self.end_date
            .map(|d| d.and_hms_milli_opt(23, 59, 59, 999).expect("valid wall-clock time"))
    }

    /// Whether the challenge is completed at `now` (local wall time).
    ///
    /// The final day counts in full: at 23:59:59.999 on the end date the
    /// challenge is still running; from 00:00:00.000 the next day it is
    /// completed. A challenge without an end date never completes.
    pub fn is_completed(&self, now: NaiveDateTime) -> bool {
        match self.deadline() {
            Some(deadline) => now > deadline,
            None => false,
        }
    }

    /// Countdown label state for `now`, or `None` without an end date.
    pub fn countdown(&self, now: NaiveDateTime) -> Option<Countdown> {
        let deadline = self.deadline()?;
        let left = deadline - now;

        if left <= Duration::zero() {
            return Some(Countdown::Completed);
        }

        let total_hours = left.num_hours();
        Some(Countdown::Remaining {
            days: total_hours / 24,
            hours: total_hours % 24,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn challenge_ending(end: NaiveDate) -> Challenge {
        Challenge::new("Run 3x/week".to_string(), ChallengeKind::Binary, Frequency::Weekly)
            .unwrap()
            .with_dates(date(2025, 1, 1), end)
            .unwrap()
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Challenge::new("  ".to_string(), ChallengeKind::Binary, Frequency::Daily);

        assert_eq!(result, Err(ChallengeError::EmptyName));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let result = Challenge::new("Read".to_string(), ChallengeKind::Binary, Frequency::Daily)
            .unwrap()
            .with_dates(date(2025, 3, 10), date(2025, 3, 9));

        assert_eq!(result, Err(ChallengeError::EndsBeforeStart));
    }

    #[test]
    fn test_single_day_window_allowed() {
        let result = Challenge::new("Read".to_string(), ChallengeKind::Binary, Frequency::Daily)
            .unwrap()
            .with_dates(date(2025, 3, 10), date(2025, 3, 10));

        assert!(result.is_ok());
    }

    #[test]
    fn test_not_completed_at_last_millisecond_of_end_date() {
        let challenge = challenge_ending(date(2025, 6, 30));
        let now = date(2025, 6, 30).and_hms_milli_opt(23, 59, 59, 999).unwrap();

        assert!(!challenge.is_completed(now));
    }

    #[test]
    fn test_completed_at_midnight_after_end_date() {
        let challenge = challenge_ending(date(2025, 6, 30));
        let now = date(2025, 7, 1).and_hms_opt(0, 0, 0).unwrap();

        assert!(challenge.is_completed(now));
    }

    #[test]
    fn test_never_completed_without_end_date() {
        let challenge =
            Challenge::new("Open ended".to_string(), ChallengeKind::Numeric, Frequency::Daily)
                .unwrap();
        let now = date(2099, 1, 1).and_hms_opt(12, 0, 0).unwrap();

        assert!(!challenge.is_completed(now));
        assert_eq!(challenge.countdown(now), None);
    }

    #[test]
    fn test_countdown_days_and_hours() {
        let challenge = challenge_ending(date(2025, 6, 30));
        // Deadline is 2025-06-30 23:59:59.999; 2 days and ~5 hours earlier.
        let now = date(2025, 6, 28).and_hms_opt(18, 30, 0).unwrap();

        assert_eq!(
            challenge.countdown(now),
            Some(Countdown::Remaining { days: 2, hours: 5 })
        );
    }

    #[test]
    fn test_countdown_completed_after_deadline() {
        let challenge = challenge_ending(date(2025, 6, 30));
        let now = date(2025, 7, 2).and_hms_opt(9, 0, 0).unwrap();

        assert_eq!(challenge.countdown(now), Some(Countdown::Completed));
    }

    #[test]
    fn test_countdown_display() {
        assert_eq!(Countdown::Remaining { days: 3, hours: 7 }.to_string(), "3d 7h left");
        assert_eq!(Countdown::Completed.to_string(), "completed");
    }

    #[test]
    fn test_challenge_serialization_roundtrip() {
        let challenge = challenge_ending(date(2025, 6, 30)).with_reminder(true);

        let json = serde_json::to_string(&challenge).unwrap();
        let back: Challenge = serde_json::from_str(&json).unwrap();

        assert_eq!(back, challenge);
    }
}
