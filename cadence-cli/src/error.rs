#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Client error: {0}")]
    Client(#[from] cadence_client::ClientError),

    #[error("Invalid challenge: {0}")]
    Challenge(#[from] cadence_core::ChallengeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
