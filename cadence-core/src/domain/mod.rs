pub mod challenge;
pub mod feed;
pub mod group;
pub mod rank;
pub mod report;
pub mod standings;

pub use challenge::{Challenge, ChallengeError, ChallengeId, ChallengeKind, Countdown, Frequency};
pub use feed::{annotate_feed, merge_group_order, FeedEntry, MergedFeed};
pub use group::{Group, GroupId, GroupMember, UserId, UserProfile};
pub use rank::{Rank, RankLabel};
pub use report::{points_awarded, Proof, Report, ReportDraft, ReportError};
pub use standings::{rank_members, MemberScore, Standing};
