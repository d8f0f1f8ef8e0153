pub mod auth;
pub mod feed;
pub mod leaderboard;
pub mod reminders;
pub mod use_cases;

pub use auth::{AuthEvent, AuthWatch, SubscriptionId};
pub use feed::{FeedController, RefreshOutcome};
pub use leaderboard::load_leaderboard;
pub use reminders::{ChallengeReminders, NotificationScheduler, ReminderTrigger, SchedulerError};
pub use use_cases::{create_group, join_by_invite_code};
