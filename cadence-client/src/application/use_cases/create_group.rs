use crate::error::Result;
use crate::infrastructure::{Backend, NewGroup};
use cadence_core::{GroupId, UserId};

/// Create a group together with its challenge.
///
/// The challenge parameters are validated locally (same rules as the
/// domain type) before the backend is asked to create both records
/// atomically.
pub async fn create_group<B: Backend>(
    backend: &B,
    user: UserId,
    new_group: NewGroup,
) -> Result<GroupId> {
    // Fail fast on invalid parameters; the validated value is discarded,
    // the backend builds its own records from the request.
    new_group.challenge.clone().into_challenge()?;

    let group_id = backend.create_group(user, new_group).await?;
    tracing::info!("Created group {}", group_id);
    Ok(group_id)
}
