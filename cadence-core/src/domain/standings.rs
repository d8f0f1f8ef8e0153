use crate::domain::{Rank, UserId};
use serde::{Deserialize, Serialize};

/// One member's merged score row, ready for ranking.
///
/// Built by the caller from the membership, profile, and per-group point
/// lookups; points here are always per-group, never lifetime totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberScore {
    pub user_id: UserId,
    pub display_name: String,
    pub points: u32,
    pub streak: u32,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A ranked leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub rank: Rank,
    pub member: MemberScore,
}

/// Order members into a leaderboard: points descending, ranks 1..n.
///
/// The sort is stable, so members with equal points keep their input
/// order; callers that pass members in a deterministic order get a
/// deterministic board.
pub fn rank_members(mut members: Vec<MemberScore>) -> Vec<Standing> {
    members.sort_by(|a, b| b.points.cmp(&a.points));

    members
        .into_iter()
        .enumerate()
        .map(|(idx, member)| Standing {
            rank: Rank::new(idx as u32 + 1).expect("positions start at 1"),
            member,
        })
        .collect()
}
