use crate::error::Result;
use crate::infrastructure::Backend;
use cadence_core::{rank_members, GroupId, MemberScore, Standing, UserId, UserProfile};
use std::collections::HashMap;

/// Name shown when neither the profile nor the membership row has one
const FALLBACK_NAME: &str = "Member";

/// Load and rank a group's leaderboard.
///
/// Merges the membership rows with profile data and the per-group point
/// totals, then ranks by points. Points are per-group; a failure fetching
/// them degrades to a zero-point board rather than failing the screen.
/// Member and profile fetch failures propagate.
pub async fn load_leaderboard<B: Backend>(backend: &B, group: GroupId) -> Result<Vec<Standing>> {
    let members = backend.fetch_group_members(group).await?;

    let member_ids: Vec<UserId> = members.iter().map(|m| m.user_id).collect();
    let profiles: HashMap<UserId, UserProfile> = backend
        .fetch_user_profiles(&member_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let points = match backend.fetch_group_points(group).await {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!("Group points unavailable, showing zero-point board: {}", e);
            HashMap::new()
        }
    };

    let scores: Vec<MemberScore> = members
        .into_iter()
        .map(|member| {
            let profile = profiles.get(&member.user_id);
            let display_name = profile
                .and_then(|p| p.display_name.clone())
                .or(member.display_name)
                .unwrap_or_else(|| FALLBACK_NAME.to_string());

            MemberScore {
                user_id: member.user_id,
                display_name,
                points: points.get(&member.user_id).copied().unwrap_or(0),
                streak: member.streak,
                avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            }
        })
        .collect();

    Ok(rank_members(scores))
}
