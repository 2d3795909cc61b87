//! Group permission checks.
//!
//! The single reusable policy helper: every group-scoped operation
//! first resolves the caller's membership flags through this function.

use domain::models::MembershipFlags;
use persistence::repositories::MembershipRepository;
use sqlx::PgPool;

use crate::error::ApiError;

/// Fetch the caller's capability pair for a group.
///
/// Fails with `Forbidden` when the caller is not a member, or when
/// `require_write` is set and the membership lacks write access. A
/// missing group looks exactly like a missing membership.
pub async fn check_group_permissions(
    pool: &PgPool,
    group_id: i64,
    user_id: i64,
    require_write: bool,
) -> Result<MembershipFlags, ApiError> {
    let repo = MembershipRepository::new(pool.clone());

    let flags: MembershipFlags = repo
        .flags(group_id, user_id)
        .await?
        .ok_or_else(|| ApiError::Forbidden("You are not a member of this group".to_string()))?
        .into();

    if require_write && !flags.can_write {
        return Err(ApiError::Forbidden(
            "You do not have write access to this group".to_string(),
        ));
    }

    Ok(flags)
}
