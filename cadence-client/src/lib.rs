// Domain layer (client-side state)
pub mod domain;

// Application layer (use cases)
pub mod application;

// Infrastructure layer (collaborator contracts and adapters)
pub mod infrastructure;

mod error;

// Re-exports for convenience
pub use application::{
    load_leaderboard, AuthEvent, AuthWatch, ChallengeReminders, FeedController, NotificationScheduler,
    RefreshOutcome, ReminderTrigger, SchedulerError,
};
pub use domain::{CycleToken, EditError, EditSession, FailureNotice, FetchCycles, ListMode};
pub use error::{ClientError, Result};
pub use infrastructure::{
    Backend, BackendError, Clock, FixedClock, InMemoryBackend, KeyValueStore, LocalSettings,
    MemoryStore, NewChallenge, NewGroup, OrderStore, StorageError, SystemClock,
};
