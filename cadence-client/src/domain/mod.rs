pub mod edit_session;
pub mod notice;
pub mod refresh;

pub use edit_session::{EditError, EditSession, ListMode};
pub use notice::FailureNotice;
pub use refresh::{CycleToken, FetchCycles};
