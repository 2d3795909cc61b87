//! Membership routes: listing members and administering their
//! permission flags.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::member::{ListMembersResponse, UpdateMemberPermissionsRequest};
use domain::models::GroupMember;
use persistence::repositories::MembershipRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::check_group_permissions;

/// List all members of a group.
///
/// GET /api/v1/groups/:group_id/members
///
/// Requires membership in the group.
pub async fn list_members(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<i64>,
) -> Result<Json<ListMembersResponse>, ApiError> {
    check_group_permissions(&state.pool, group_id, user_auth.user_id, false).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    let members: Vec<GroupMember> = repo
        .list_members(group_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let count = members.len();

    Ok(Json(ListMembersResponse {
        data: members,
        count,
    }))
}

/// Change another member's permission flags.
///
/// PUT /api/v1/groups/:group_id/members/:member_id
///
/// Requires write access. Owners always keep write access, members
/// cannot edit their own flags, and only owners may grant or revoke
/// owner status.
pub async fn update_member_permissions(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((group_id, member_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateMemberPermissionsRequest>,
) -> Result<StatusCode, ApiError> {
    if user_auth.user_id == member_id {
        return Err(ApiError::InvalidCommand(
            "group members cannot modify their own privileges".to_string(),
        ));
    }

    // An owner without write access is not representable.
    let requested = request.requested_flags();

    let caller = check_group_permissions(&state.pool, group_id, user_auth.user_id, true).await?;

    let repo = MembershipRepository::new(state.pool.clone());
    let membership = repo.flags(group_id, member_id).await?.ok_or_else(|| {
        ApiError::NotFound(format!("member with id {} does not exist", member_id))
    })?;

    if membership.is_owner == requested.is_owner && membership.can_write == requested.can_write {
        // no changes
        return Ok(StatusCode::NO_CONTENT);
    }

    if membership.is_owner && !caller.is_owner {
        return Err(ApiError::Forbidden(
            "group members cannot degrade other owners without being an owner".to_string(),
        ));
    }

    if requested.is_owner && !caller.is_owner {
        return Err(ApiError::Forbidden(
            "group members cannot promote others to owner without being an owner".to_string(),
        ));
    }

    let rows = repo
        .update_permissions(group_id, member_id, requested.can_write, requested.is_owner)
        .await?;
    if rows == 0 {
        return Err(ApiError::NotFound(format!(
            "member with id {} does not exist",
            member_id
        )));
    }

    info!(
        group_id = group_id,
        member_id = member_id,
        user_id = user_auth.user_id,
        can_write = requested.can_write,
        is_owner = requested.is_owner,
        "Member permissions updated"
    );

    Ok(StatusCode::NO_CONTENT)
}
