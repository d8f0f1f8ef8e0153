use crate::domain::{Countdown, Group, GroupId, Rank, RankLabel};
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

/// Result of merging a fresh group fetch with the persisted manual order
#[derive(Debug, Clone, PartialEq)]
pub struct MergedFeed {
    /// Fetched groups in display order
    pub groups: Vec<Group>,

    /// The persisted order including newcomers, present only when it
    /// differs from the saved one and should be written back
    pub updated_order: Option<Vec<GroupId>>,
}

/// Merge freshly fetched groups with the user's persisted manual order.
///
/// Groups whose ids appear in `saved_order` come first, in that order;
/// everything else follows in fetch order. Ids in `saved_order` with no
/// matching fetched group are ignored (hidden or deleted since the order
/// was written): they never surface in the output and stay in storage
/// until a later rewrite drops them.
///
/// Deterministic: the same inputs always produce the same output. No
/// fetched group is ever dropped and none is fabricated.
pub fn merge_group_order(fetched: Vec<Group>, saved_order: &[GroupId]) -> MergedFeed {
    if fetched.is_empty() {
        return MergedFeed { groups: fetched, updated_order: None };
    }

    // First occurrence wins if the saved order ever picked up duplicates.
    let mut position: HashMap<GroupId, usize> = HashMap::with_capacity(saved_order.len());
    for (idx, id) in saved_order.iter().enumerate() {
        position.entry(*id).or_insert(idx);
    }

    let mut indexed: Vec<(usize, Group)> = fetched.into_iter().enumerate().collect();
    indexed.sort_by_key(|(fetch_idx, group)| {
        // Unknown ids sort after every saved position; the fetch index
        // breaks ties so newcomers keep their server order.
        (position.get(&group.id).copied().unwrap_or(usize::MAX), *fetch_idx)
    });
    let groups: Vec<Group> = indexed.into_iter().map(|(_, group)| group).collect();

    // Saved order followed by newcomers in display order, deduplicated.
    let mut seen: HashSet<GroupId> = HashSet::with_capacity(saved_order.len() + groups.len());
    let mut next_order: Vec<GroupId> = Vec::with_capacity(saved_order.len() + groups.len());
    for id in saved_order.iter().copied().chain(groups.iter().map(|g| g.id)) {
        if seen.insert(id) {
            next_order.push(id);
        }
    }

    let updated_order = if next_order.len() != saved_order.len() {
        tracing::debug!(
            "Group order grew from {} to {} entries",
            saved_order.len(),
            next_order.len()
        );
        Some(next_order)
    } else {
        None
    };

    MergedFeed { groups, updated_order }
}

/// One row of the home feed, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub group: Group,

    /// Countdown to the challenge deadline, when the group has a
    /// challenge with an end date
    pub countdown: Option<Countdown>,

    /// The user's standing in this group
    pub rank: RankLabel,
}

/// Attach countdown and rank labels to an ordered group list.
///
/// Pure: `now` is the injected local wall time, `ranks` is the batch
/// lookup result (absent entry → no rank yet).
pub fn annotate_feed(
    groups: Vec<Group>,
    ranks: &HashMap<GroupId, Rank>,
    now: NaiveDateTime,
) -> Vec<FeedEntry> {
    groups
        .into_iter()
        .map(|group| {
            let countdown = group.challenge.as_ref().and_then(|c| c.countdown(now));
            let rank = RankLabel::from_lookup(ranks.get(&group.id).copied());
            FeedEntry { group, countdown, rank }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Challenge, ChallengeKind, Frequency};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn group(name: &str) -> Group {
        Group::new(name.to_string(), Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
    }

    fn ids(groups: &[Group]) -> Vec<GroupId> {
        groups.iter().map(|g| g.id).collect()
    }

    fn names(feed: &MergedFeed) -> Vec<&str> {
        feed.groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_saved_order_wins_over_fetch_order() {
        let a = group("a");
        let b = group("b");
        let c = group("c");
        let saved = vec![b.id, a.id];

        let feed = merge_group_order(vec![a.clone(), b.clone(), c.clone()], &saved);

        assert_eq!(names(&feed), vec!["b", "a", "c"]);
        assert_eq!(feed.updated_order, Some(vec![b.id, a.id, c.id]));
    }

    #[test]
    fn test_unknown_ids_keep_server_order() {
        let a = group("a");
        let b = group("b");
        let c = group("c");
        let d = group("d");
        let saved = vec![c.id];

        let feed = merge_group_order(vec![a.clone(), b.clone(), c.clone(), d.clone()], &saved);

        assert_eq!(names(&feed), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_empty_saved_order_appends_in_fetch_order() {
        let a = group("a");
        let b = group("b");

        let feed = merge_group_order(vec![a.clone(), b.clone()], &[]);

        assert_eq!(names(&feed), vec!["a", "b"]);
        assert_eq!(feed.updated_order, Some(vec![a.id, b.id]));
    }

    #[test]
    fn test_unchanged_order_is_not_rewritten() {
        let a = group("a");
        let b = group("b");
        let saved = vec![a.id, b.id];

        let feed = merge_group_order(vec![a.clone(), b.clone()], &saved);

        assert_eq!(names(&feed), vec!["a", "b"]);
        assert_eq!(feed.updated_order, None);
    }

    #[test]
    fn test_stale_saved_ids_are_ignored() {
        let a = group("a");
        let gone = Uuid::new_v4();
        let saved = vec![gone, a.id];

        let feed = merge_group_order(vec![a.clone()], &saved);

        assert_eq!(ids(&feed.groups), vec![a.id]);
        // Same length as before: nothing to persist, the stale id stays.
        assert_eq!(feed.updated_order, None);
    }

    #[test]
    fn test_empty_fetch_yields_empty_feed_and_no_write() {
        let saved = vec![Uuid::new_v4(), Uuid::new_v4()];

        let feed = merge_group_order(Vec::new(), &saved);

        assert!(feed.groups.is_empty());
        assert_eq!(feed.updated_order, None);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let a = group("a");
        let b = group("b");
        let c = group("c");
        let saved = vec![c.id, a.id];
        let fetched = vec![a.clone(), b.clone(), c.clone()];

        let first = merge_group_order(fetched.clone(), &saved);
        let second = merge_group_order(fetched, &saved);

        assert_eq!(first, second);
    }

    #[test]
    fn test_no_group_dropped_or_fabricated() {
        let fetched: Vec<Group> = (0..5).map(|i| group(&format!("g{}", i))).collect();
        let fetched_ids: HashSet<GroupId> = fetched.iter().map(|g| g.id).collect();
        let saved = vec![fetched[3].id, Uuid::new_v4(), fetched[1].id];

        let feed = merge_group_order(fetched, &saved);

        let out_ids: HashSet<GroupId> = feed.groups.iter().map(|g| g.id).collect();
        assert_eq!(out_ids, fetched_ids);
        assert_eq!(feed.groups.len(), 5);
    }

    #[test]
    fn test_annotate_rank_labels() {
        let a = group("a");
        let b = group("b");
        let mut ranks = HashMap::new();
        ranks.insert(a.id, Rank::first());

        let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let entries = annotate_feed(vec![a, b], &ranks, now);

        assert_eq!(entries[0].rank, RankLabel::Placed(Rank::first()));
        assert_eq!(entries[1].rank, RankLabel::Unranked);
    }

    #[test]
    fn test_annotate_countdown_from_challenge() {
        let challenge =
            Challenge::new("Swim".to_string(), ChallengeKind::Binary, Frequency::Daily)
                .unwrap()
                .with_dates(
                    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                )
                .unwrap();
        let with_challenge = group("a").with_challenge(challenge);
        let without = group("b");

        let now = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let entries = annotate_feed(vec![with_challenge, without], &HashMap::new(), now);

        assert_eq!(entries[0].countdown, Some(Countdown::Completed));
        assert_eq!(entries[1].countdown, None);
    }
}
