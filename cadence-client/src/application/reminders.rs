use crate::infrastructure::KeyValueStore;
use async_trait::async_trait;
use cadence_core::{Challenge, ChallengeId, Frequency};
use chrono::{Datelike, NaiveDateTime, Weekday};

/// Hour of day (local) reminders fire at
pub const REMINDER_HOUR: u32 = 20;

/// When a scheduled reminder repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTrigger {
    /// Every day at the given local time
    Daily { hour: u32, minute: u32 },
    /// Every week on the given weekday at the given local time
    Weekly { weekday: Weekday, hour: u32, minute: u32 },
}

/// Compute the repeating trigger for a challenge's cadence.
///
/// Daily challenges remind every evening; weekly ones remind on the
/// weekday the reminder was turned on.
pub fn trigger_for(frequency: Frequency, now: NaiveDateTime) -> ReminderTrigger {
    match frequency {
        Frequency::Daily => ReminderTrigger::Daily { hour: REMINDER_HOUR, minute: 0 },
        Frequency::Weekly => ReminderTrigger::Weekly {
            weekday: now.weekday(),
            hour: REMINDER_HOUR,
            minute: 0,
        },
    }
}

/// Errors from the platform notification scheduler
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Platform error: {0}")]
    Platform(String),
}

/// A reminder to hand to the platform scheduler
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderRequest {
    pub challenge_id: ChallengeId,
    pub title: String,
    pub body: String,
    pub trigger: ReminderTrigger,
}

/// Platform-local notification scheduling.
///
/// `schedule` returns an opaque platform id used for later cancellation.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    async fn schedule(&self, request: ReminderRequest) -> Result<String, SchedulerError>;
    async fn cancel(&self, scheduled_id: &str) -> Result<(), SchedulerError>;
}

fn reminder_key(challenge_id: ChallengeId) -> String {
    format!("cadence.reminder.{}", challenge_id)
}

/// Per-challenge reminder bookkeeping.
///
/// At most one scheduled reminder exists per challenge: enabling always
/// cancels whatever was scheduled before, and the platform id is kept in
/// local storage so the reminder survives across sessions and can be
/// cancelled later.
pub struct ChallengeReminders<S, N> {
    store: S,
    scheduler: N,
}

impl<S: KeyValueStore, N: NotificationScheduler> ChallengeReminders<S, N> {
    pub fn new(store: S, scheduler: N) -> Self {
        Self { store, scheduler }
    }

    /// Schedule (or reschedule) the reminder for a challenge.
    pub async fn enable(
        &self,
        challenge: &Challenge,
        now: NaiveDateTime,
    ) -> Result<String, SchedulerError> {
        self.disable(challenge.id()).await;

        let request = ReminderRequest {
            challenge_id: challenge.id(),
            title: "Time to report".to_string(),
            body: format!("Time to report: {}", challenge.name()),
            trigger: trigger_for(challenge.frequency(), now),
        };

        let scheduled_id = self.scheduler.schedule(request).await?;

        let key = reminder_key(challenge.id());
        if let Err(e) = self.store.set(&key, &scheduled_id).await {
            tracing::warn!("Could not persist reminder id for {}: {}", challenge.id(), e);
        }

        Ok(scheduled_id)
    }

    /// Cancel the reminder for a challenge, if one is scheduled.
    /// Best-effort: a platform cancel failure still clears the stored id.
    pub async fn disable(&self, challenge_id: ChallengeId) {
        let key = reminder_key(challenge_id);

        let existing = match self.store.get(&key).await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!("Could not read reminder id for {}: {}", challenge_id, e);
                None
            }
        };

        if let Some(scheduled_id) = existing {
            if let Err(e) = self.scheduler.cancel(&scheduled_id).await {
                tracing::debug!("Cancel of reminder {} failed: {}", scheduled_id, e);
            }
            if let Err(e) = self.store.remove(&key).await {
                tracing::warn!("Could not clear reminder id for {}: {}", challenge_id, e);
            }
        }
    }
}
