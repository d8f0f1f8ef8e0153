use crate::domain::EditError;
use crate::infrastructure::BackendError;

/// Client-side errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Reorder must be a permutation of the visible list")]
    NotAPermutation,

    #[error("Invite code too short")]
    InviteCodeTooShort,

    #[error("Invalid challenge: {0}")]
    Challenge(#[from] cadence_core::ChallengeError),

    #[error("Invalid report: {0}")]
    Report(#[from] cadence_core::ReportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
