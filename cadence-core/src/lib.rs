pub mod domain;

pub use domain::{
    annotate_feed, merge_group_order, points_awarded, rank_members, Challenge, ChallengeError,
    ChallengeId, ChallengeKind, Countdown, FeedEntry, Frequency, Group, GroupId, GroupMember,
    MemberScore, MergedFeed, Proof, Rank, RankLabel, Report, ReportDraft, ReportError, Standing,
    UserId, UserProfile,
};
