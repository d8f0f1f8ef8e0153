use crate::domain::Challenge;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group ID (server-assigned, opaque)
pub type GroupId = Uuid;

/// User ID (server-assigned, opaque)
pub type UserId = Uuid;

/// A group a user participates in, as fetched from the server.
///
/// Groups are server-owned; the client holds read-only copies for the
/// lifetime of a screen and refetches on focus. A group carries zero or
/// one challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique ID
    pub id: GroupId,

    /// Display name
    pub name: String,

    /// Optional emoji/icon shown on the group card
    #[serde(default)]
    pub icon: Option<String>,

    /// Server-side creation time (fetch order is newest first)
    pub created_at: DateTime<Utc>,

    /// The active challenge, if any
    #[serde(default)]
    pub challenge: Option<Challenge>,
}

impl Group {
    /// Create a new group record with a random ID
    pub fn new(name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            icon: None,
            created_at,
            challenge: None,
        }
    }

    pub fn with_icon(mut self, icon: String) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }
}

/// Membership row returned by the group-members lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: UserId,

    /// Name as stored on the membership row (may be stale; the profile wins)
    #[serde(default)]
    pub display_name: Option<String>,

    /// Consecutive reporting streak
    #[serde(default)]
    pub streak: u32,
}

/// Profile row from the users table (names are synced from auth metadata)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Lifetime points across all groups. Display only; never feeds
    /// per-group ranking.
    #[serde(default)]
    pub total_points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_builder() {
        let group = Group::new("Morning runs".to_string(), Utc::now()).with_icon("🏃".to_string());

        assert_eq!(group.name, "Morning runs");
        assert_eq!(group.icon.as_deref(), Some("🏃"));
        assert!(group.challenge.is_none());
    }

    #[test]
    fn test_unique_group_ids() {
        let a = Group::new("A".to_string(), Utc::now());
        let b = Group::new("A".to_string(), Utc::now());

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_group_serialization_roundtrip() {
        let group = Group::new("Book club".to_string(), Utc::now());

        let json = serde_json::to_string(&group).unwrap();
        let back: Group = serde_json::from_str(&json).unwrap();

        assert_eq!(back, group);
    }

    #[test]
    fn test_member_defaults() {
        let json = format!(r#"{{"user_id":"{}"}}"#, Uuid::new_v4());
        let member: GroupMember = serde_json::from_str(&json).unwrap();

        assert!(member.display_name.is_none());
        assert_eq!(member.streak, 0);
    }
}
