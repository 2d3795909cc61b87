//! Group management routes for creating and managing expense groups.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::group::{CreateGroupRequest, ListGroupsResponse, UpdateGroupRequest};
use domain::models::Group;
use persistence::repositories::GroupRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_group_created;
use crate::services::check_group_permissions;

/// Create a new group.
///
/// POST /api/v1/groups
///
/// Requires authentication. The creator becomes the group's owner with
/// write access.
pub async fn create_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    request.validate()?;

    let repo = GroupRepository::new(state.pool.clone());

    let group = repo
        .create_group(
            &request.name,
            &request.description,
            &request.currency_symbol,
            &request.terms,
            user_auth.user_id,
        )
        .await?;

    record_group_created();
    info!(
        group_id = group.id,
        group_name = %group.name,
        user_id = user_auth.user_id,
        "Group created"
    );

    Ok((StatusCode::CREATED, Json(group.into())))
}

/// List groups the current user belongs to.
///
/// GET /api/v1/groups
pub async fn list_groups(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<ListGroupsResponse>, ApiError> {
    let repo = GroupRepository::new(state.pool.clone());

    let groups: Vec<Group> = repo
        .list_for_user(user_auth.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let count = groups.len();

    Ok(Json(ListGroupsResponse {
        data: groups,
        count,
    }))
}

/// Get one group.
///
/// GET /api/v1/groups/:group_id
///
/// Requires membership in the group.
pub async fn get_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<i64>,
) -> Result<Json<Group>, ApiError> {
    check_group_permissions(&state.pool, group_id, user_auth.user_id, false).await?;

    let repo = GroupRepository::new(state.pool.clone());
    let group = repo.find_by_id(group_id).await?.ok_or_else(|| {
        ApiError::NotFound(format!("Group with id {} does not exist", group_id))
    })?;

    Ok(Json(group.into()))
}

/// Update a group's mutable fields.
///
/// PUT /api/v1/groups/:group_id
///
/// Requires write access. All mutable fields are replaced at once.
pub async fn update_group(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(group_id): Path<i64>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    request.validate()?;

    check_group_permissions(&state.pool, group_id, user_auth.user_id, true).await?;

    let repo = GroupRepository::new(state.pool.clone());
    let group = repo
        .update_group(
            group_id,
            &request.name,
            &request.description,
            &request.currency_symbol,
            &request.terms,
        )
        .await?;

    info!(
        group_id = group_id,
        user_id = user_auth.user_id,
        "Group updated"
    );

    Ok(Json(group.into()))
}
