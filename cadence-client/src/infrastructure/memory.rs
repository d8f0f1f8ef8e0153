use crate::infrastructure::{Backend, BackendError, NewGroup};
use async_trait::async_trait;
use cadence_core::{
    ChallengeId, Group, GroupId, GroupMember, Rank, Report, ReportDraft, UserId, UserProfile,
};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    groups: HashMap<GroupId, Group>,
    members: HashMap<GroupId, Vec<GroupMember>>,
    profiles: HashMap<UserId, UserProfile>,
    /// Per-group points per member (server-accrued)
    points: HashMap<GroupId, HashMap<UserId, u32>>,
    hidden: HashSet<(UserId, GroupId)>,
    invite_codes: HashMap<String, GroupId>,
    reports: Vec<Report>,

    // Failure injection for tests and demos
    offline: bool,
    fail_hides_for: HashSet<GroupId>,
}

impl Inner {
    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline {
            Err(BackendError::Unavailable("network unreachable".to_string()))
        } else {
            Ok(())
        }
    }

    /// Rank of a user within one group: per-group points descending,
    /// ties broken by user id so the result is deterministic. Users with
    /// no points row have no rank.
    fn rank_in_group(&self, user: UserId, group: GroupId) -> Option<Rank> {
        let points = self.points.get(&group)?;
        points.get(&user)?;

        let mut scored: Vec<(&UserId, &u32)> = points.iter().collect();
        scored.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        let position = scored.iter().position(|(id, _)| **id == user)?;
        Rank::new(position as u32 + 1)
    }
}

/// In-memory backend for tests and the CLI harness.
///
/// Implements the same contract a remote deployment would, including
/// idempotent hide markers and server-side per-group ranking, plus
/// failure-injection knobs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Seeding =====

    pub async fn add_group(&self, group: Group, invite_code: &str) {
        let mut inner = self.inner.write().await;
        inner.invite_codes.insert(invite_code.to_string(), group.id);
        inner.groups.insert(group.id, group);
    }

    pub async fn add_member(&self, group: GroupId, member: GroupMember) {
        let mut inner = self.inner.write().await;
        inner.members.entry(group).or_default().push(member);
    }

    pub async fn add_profile(&self, profile: UserProfile) {
        let mut inner = self.inner.write().await;
        inner.profiles.insert(profile.id, profile);
    }

    pub async fn set_points(&self, group: GroupId, user: UserId, points: u32) {
        let mut inner = self.inner.write().await;
        inner.points.entry(group).or_default().insert(user, points);
    }

    // ===== Failure injection =====

    /// Make every fetch fail until switched back.
    pub async fn set_offline(&self, offline: bool) {
        self.inner.write().await.offline = offline;
    }

    /// Make hiding this specific group fail.
    pub async fn fail_hides_for(&self, group: GroupId) {
        self.inner.write().await.fail_hides_for.insert(group);
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn fetch_visible_groups(&self, user: UserId) -> Result<Vec<Group>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        let mut groups: Vec<Group> = inner
            .groups
            .values()
            .filter(|g| !inner.hidden.contains(&(user, g.id)))
            .cloned()
            .collect();
        // Newest first; id as a tie-break keeps the order stable.
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(groups)
    }

    async fn fetch_hidden_group_ids(&self, user: UserId) -> Result<HashSet<GroupId>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        Ok(inner
            .hidden
            .iter()
            .filter(|(u, _)| *u == user)
            .map(|(_, g)| *g)
            .collect())
    }

    async fn fetch_ranks(
        &self,
        user: UserId,
        group_ids: &[GroupId],
    ) -> Result<HashMap<GroupId, Rank>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        Ok(group_ids
            .iter()
            .filter_map(|group| inner.rank_in_group(user, *group).map(|rank| (*group, rank)))
            .collect())
    }

    async fn mark_group_hidden(&self, user: UserId, group: GroupId) -> Result<(), BackendError> {
        let mut inner = self.inner.write().await;
        inner.ensure_online()?;

        if inner.fail_hides_for.contains(&group) {
            return Err(BackendError::Unavailable("hide rejected".to_string()));
        }
        if !inner.groups.contains_key(&group) {
            return Err(BackendError::NotFound(group.to_string()));
        }

        // Upsert on the (user, group) pair: re-hiding is a no-op.
        inner.hidden.insert((user, group));
        Ok(())
    }

    async fn join_group_by_invite_code(
        &self,
        user: UserId,
        invite_code: &str,
    ) -> Result<GroupId, BackendError> {
        let mut inner = self.inner.write().await;
        inner.ensure_online()?;

        let group = *inner
            .invite_codes
            .get(invite_code)
            .ok_or(BackendError::InvalidInviteCode)?;

        let members = inner.members.entry(group).or_default();
        if !members.iter().any(|m| m.user_id == user) {
            members.push(GroupMember { user_id: user, display_name: None, streak: 0 });
        }

        Ok(group)
    }

    async fn create_group(&self, user: UserId, new_group: NewGroup) -> Result<GroupId, BackendError> {
        let challenge = new_group
            .challenge
            .into_challenge()
            .map_err(|e| BackendError::Rejected(e.to_string()))?;

        let mut group = Group::new(new_group.name, Utc::now()).with_challenge(challenge);
        if let Some(icon) = new_group.icon {
            group = group.with_icon(icon);
        }
        let group_id = group.id;
        let invite_code = group_id.simple().to_string()[..6].to_string();

        let mut inner = self.inner.write().await;
        inner.ensure_online()?;
        inner.invite_codes.insert(invite_code, group_id);
        inner.groups.insert(group_id, group);
        inner
            .members
            .entry(group_id)
            .or_default()
            .push(GroupMember { user_id: user, display_name: None, streak: 0 });

        Ok(group_id)
    }

    async fn submit_report(&self, report: ReportDraft) -> Result<(), BackendError> {
        let mut inner = self.inner.write().await;
        inner.ensure_online()?;

        if !inner.groups.contains_key(&report.group_id) {
            return Err(BackendError::NotFound(report.group_id.to_string()));
        }

        let entry = inner
            .points
            .entry(report.group_id)
            .or_default()
            .entry(report.user_id)
            .or_insert(0);
        *entry += report.points_earned;

        inner.reports.push(Report {
            id: Uuid::new_v4(),
            challenge_id: report.challenge_id,
            group_id: report.group_id,
            user_id: report.user_id,
            value: report.value,
            is_done: report.is_done,
            points_earned: report.points_earned,
            proof: report.proof,
            created_at: Utc::now(),
        });

        Ok(())
    }

    async fn fetch_member_reports(
        &self,
        challenge: ChallengeId,
        user: UserId,
    ) -> Result<Vec<Report>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        let mut reports: Vec<Report> = inner
            .reports
            .iter()
            .filter(|r| r.challenge_id == challenge && r.user_id == user)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(reports)
    }

    async fn fetch_group_members(&self, group: GroupId) -> Result<Vec<GroupMember>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        Ok(inner.members.get(&group).cloned().unwrap_or_default())
    }

    async fn fetch_user_profiles(&self, users: &[UserId]) -> Result<Vec<UserProfile>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        Ok(users.iter().filter_map(|id| inner.profiles.get(id).cloned()).collect())
    }

    async fn fetch_group_points(&self, group: GroupId) -> Result<HashMap<UserId, u32>, BackendError> {
        let inner = self.inner.read().await;
        inner.ensure_online()?;

        Ok(inner.points.get(&group).cloned().unwrap_or_default())
    }
}

/// Helper for seeding: a group created `minutes_ago` minutes ago.
pub fn group_created_at(minutes_ago: i64) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::minutes(minutes_ago)
}
