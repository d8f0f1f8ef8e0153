use async_trait::async_trait;
use cadence_core::{
    Challenge, ChallengeError, ChallengeId, ChallengeKind, Frequency, Group, GroupId, GroupMember,
    Rank, Report, ReportDraft, UserId, UserProfile,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Errors from the remote backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid invite code")]
    InvalidInviteCode,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Request shape for creating a group with its challenge in one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGroup {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub challenge: NewChallenge,
}

/// Challenge parameters accompanying a group creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChallenge {
    pub name: String,
    pub kind: ChallengeKind,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reminder_enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewChallenge {
    /// Validate and build the domain challenge this request describes.
    pub fn into_challenge(self) -> Result<Challenge, ChallengeError> {
        let mut challenge = Challenge::new(self.name, self.kind, self.frequency)?
            .with_dates(self.start_date, self.end_date)?
            .with_reminder(self.reminder_enabled);
        if let Some(description) = self.description {
            challenge = challenge.with_description(description);
        }
        Ok(challenge)
    }
}

/// The remote backend the client talks to.
///
/// All business logic (point accrual, ranking, invite validation,
/// membership) lives behind this trait; the client only aggregates what
/// it returns. Implementations must make `mark_group_hidden` an upsert
/// keyed on the (user, group) pair: re-hiding an already-hidden group is
/// not an error.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Groups visible to the user, hidden ones excluded, newest first.
    async fn fetch_visible_groups(&self, user: UserId) -> Result<Vec<Group>, BackendError>;

    /// Ids of groups the user has hidden.
    async fn fetch_hidden_group_ids(&self, user: UserId) -> Result<HashSet<GroupId>, BackendError>;

    /// The user's rank in each of the given groups. Groups where the
    /// user has no qualifying reports yet are absent from the map.
    async fn fetch_ranks(
        &self,
        user: UserId,
        group_ids: &[GroupId],
    ) -> Result<HashMap<GroupId, Rank>, BackendError>;

    /// Hide a group from this user's view (idempotent).
    async fn mark_group_hidden(&self, user: UserId, group: GroupId) -> Result<(), BackendError>;

    /// Join a group via its invite code; returns the joined group's id.
    async fn join_group_by_invite_code(
        &self,
        user: UserId,
        invite_code: &str,
    ) -> Result<GroupId, BackendError>;

    /// Create a group together with its challenge; returns the new id.
    async fn create_group(&self, user: UserId, new_group: NewGroup) -> Result<GroupId, BackendError>;

    /// Submit a progress report.
    async fn submit_report(&self, report: ReportDraft) -> Result<(), BackendError>;

    /// One member's report history for a challenge, newest first.
    async fn fetch_member_reports(
        &self,
        challenge: ChallengeId,
        user: UserId,
    ) -> Result<Vec<Report>, BackendError>;

    /// Membership rows for a group.
    async fn fetch_group_members(&self, group: GroupId) -> Result<Vec<GroupMember>, BackendError>;

    /// Profile rows for the given users.
    async fn fetch_user_profiles(&self, users: &[UserId]) -> Result<Vec<UserProfile>, BackendError>;

    /// Per-group points per member (never lifetime totals).
    async fn fetch_group_points(&self, group: GroupId) -> Result<HashMap<UserId, u32>, BackendError>;
}
