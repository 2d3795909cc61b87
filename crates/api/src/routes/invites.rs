//! Invite routes: creating, listing and deleting invites, plus the
//! token-based join and preview flows.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::invite::{
    generate_invite_token, CreateInviteRequest, CreateInviteResponse, JoinGroupRequest,
    JoinGroupResponse, ListInvitesResponse,
};
use domain::models::{GroupInvite, GroupPreview};
use persistence::repositories::InviteRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_group_joined;
use crate::services::check_group_permissions;

/// Create a new invite for a group.
///
/// POST /api/v1/groups/:group_id/invites
///
/// Requires write access. The generated token is returned once here;
/// listings only repeat it to its creator.
pub async fn create_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<i64>,
    Json(request): Json<CreateInviteRequest>,
) -> Result<(StatusCode, Json<CreateInviteResponse>), ApiError> {
    request.validate()?;

    check_group_permissions(&state.pool, group_id, user_auth.user_id, true).await?;

    let token = generate_invite_token();

    let repo = InviteRepository::new(state.pool.clone());
    let invite = repo
        .create_invite(
            group_id,
            &token,
            &request.description,
            user_auth.user_id,
            request.valid_until,
            request.single_use,
        )
        .await?;

    info!(
        group_id = group_id,
        invite_id = invite.id,
        user_id = user_auth.user_id,
        single_use = invite.single_use,
        "Invite created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            id: invite.id,
            group_id: invite.group_id,
            token,
            description: invite.description,
            valid_until: invite.valid_until,
            single_use: invite.single_use,
        }),
    ))
}

/// List a group's invites.
///
/// GET /api/v1/groups/:group_id/invites
///
/// Requires membership. Tokens of invites the caller did not create
/// are redacted to null.
pub async fn list_invites(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<i64>,
) -> Result<Json<ListInvitesResponse>, ApiError> {
    check_group_permissions(&state.pool, group_id, user_auth.user_id, false).await?;

    let repo = InviteRepository::new(state.pool.clone());
    let invites: Vec<GroupInvite> = repo
        .list_invites(group_id, user_auth.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let count = invites.len();

    Ok(Json(ListInvitesResponse {
        data: invites,
        count,
    }))
}

/// Delete an invite.
///
/// DELETE /api/v1/groups/:group_id/invites/:invite_id
///
/// Requires write access.
pub async fn delete_invite(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path((group_id, invite_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    check_group_permissions(&state.pool, group_id, user_auth.user_id, true).await?;

    let repo = InviteRepository::new(state.pool.clone());
    let rows = repo.delete_invite(group_id, invite_id).await?;
    if rows == 0 {
        return Err(ApiError::NotFound(
            "No invite with the given id exists".to_string(),
        ));
    }

    info!(
        group_id = group_id,
        invite_id = invite_id,
        user_id = user_auth.user_id,
        "Invite deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Join a group using an invite token.
///
/// POST /api/v1/groups/join
///
/// The new membership is read-only and non-owner; a single-use invite
/// is consumed in the same transaction. An unknown or expired token is
/// a permission error, never not-found.
pub async fn join_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<JoinGroupRequest>,
) -> Result<Json<JoinGroupResponse>, ApiError> {
    // A malformed token is as invalid as an unknown one.
    request
        .validate()
        .map_err(|_| ApiError::Forbidden("Invalid invite token".to_string()))?;

    let repo = InviteRepository::new(state.pool.clone());
    let group_id = repo
        .join_by_token(user_auth.user_id, &request.invite_token)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Invalid invite token".to_string()))?;

    record_group_joined();
    info!(
        group_id = group_id,
        user_id = user_auth.user_id,
        "User joined group via invite"
    );

    Ok(Json(JoinGroupResponse { group_id }))
}

/// Preview a group by invite token (public, no auth required).
///
/// GET /api/v1/invites/:token
///
/// Lets the holder of a token inspect the group before joining.
pub async fn preview_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<GroupPreview>, ApiError> {
    let repo = InviteRepository::new(state.pool.clone());

    let preview = repo
        .preview_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Forbidden("Invalid invite token to preview group".to_string()))?;

    Ok(Json(preview.into()))
}
