use crate::error::{ClientError, Result};
use crate::infrastructure::Backend;
use cadence_core::{GroupId, UserId};

/// Shortest invite code worth sending to the server
pub const MIN_INVITE_CODE_LEN: usize = 4;

/// Join a group via its invite code.
///
/// The code is trimmed and length-checked locally; the actual validation
/// and membership insert happen server-side.
pub async fn join_by_invite_code<B: Backend>(
    backend: &B,
    user: UserId,
    code: &str,
) -> Result<GroupId> {
    let code = code.trim();
    if code.len() < MIN_INVITE_CODE_LEN {
        return Err(ClientError::InviteCodeTooShort);
    }

    let group_id = backend.join_group_by_invite_code(user, code).await?;
    tracing::info!("Joined group {} via invite code", group_id);
    Ok(group_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::group_created_at;
    use crate::infrastructure::{BackendError, InMemoryBackend};
    use cadence_core::Group;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_short_code_rejected_locally() {
        let backend = InMemoryBackend::new();

        let result = join_by_invite_code(&backend, Uuid::new_v4(), "  ab  ").await;

        assert!(matches!(result, Err(ClientError::InviteCodeTooShort)));
    }

    #[tokio::test]
    async fn test_code_is_trimmed_before_sending() {
        let backend = InMemoryBackend::new();
        let group = Group::new("Runners".to_string(), group_created_at(10));
        let id = group.id;
        backend.add_group(group, "sunrise").await;

        let joined = join_by_invite_code(&backend, Uuid::new_v4(), "  sunrise \n").await.unwrap();

        assert_eq!(joined, id);
    }

    #[tokio::test]
    async fn test_unknown_code_propagates_backend_error() {
        let backend = InMemoryBackend::new();

        let result = join_by_invite_code(&backend, Uuid::new_v4(), "missing").await;

        assert!(matches!(
            result,
            Err(ClientError::Backend(BackendError::InvalidInviteCode))
        ));
    }
}
