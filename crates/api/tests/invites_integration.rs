//! Integration tests for invite creation, listing, deletion, join and
//! preview flows.
//!
//! These tests require a running PostgreSQL instance.
//! Set TEST_DATABASE_URL environment variable or use docker-compose.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_group, create_test_invite, create_test_pool, create_user,
    insert_expired_invite, join_test_group, json_request_with_auth, parse_response_body,
    request_with_auth, request_without_auth, test_config,
};
use domain::models::invite::generate_invite_token;
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Invite Creation Tests
// ============================================================================

#[tokio::test]
async fn test_create_invite_returns_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Inviting").await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/groups/{}/invites", group_id),
        json!({ "description": "for the flatmates", "single_use": false }),
        &owner.token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let invite = parse_response_body(response).await;
    assert_eq!(invite["group_id"].as_i64(), Some(group_id));
    assert_eq!(invite["single_use"], false);
    assert_eq!(invite["description"], "for the flatmates");
    let token = invite["token"].as_str().unwrap();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[tokio::test]
async fn test_create_invite_requires_write_access() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let reader = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Read only").await;

    let (_invite_id, token) = create_test_invite(&app, &owner, group_id, false).await;
    assert_eq!(
        join_test_group(&app, &reader, &token).await.status(),
        StatusCode::OK
    );

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/groups/{}/invites", group_id),
        json!({ "single_use": false }),
        &reader.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_invite_with_past_expiry_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Expired on arrival").await;

    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/groups/{}/invites", group_id),
        json!({ "valid_until": "2001-01-01T00:00:00Z" }),
        &owner.token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Join Tests
// ============================================================================

#[tokio::test]
async fn test_join_with_valid_token() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let joiner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Joinable").await;
    let (_invite_id, token) = create_test_invite(&app, &owner, group_id, false).await;

    let response = join_test_group(&app, &joiner, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["group_id"].as_i64(), Some(group_id));

    // The group now shows up in the joiner's listing.
    let response = app
        .clone()
        .oneshot(request_with_auth(Method::GET, "/api/v1/groups", &joiner.token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&group_id));
}

#[tokio::test]
async fn test_join_with_unknown_token_is_forbidden() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let joiner = create_user(&pool).await;

    // Well-formed but not backed by any invite.
    let response = join_test_group(&app, &joiner, &generate_invite_token()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "forbidden");

    // Malformed tokens fail the same way, never as validation noise.
    let response = join_test_group(&app, &joiner, "definitely-not-a-token").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_join_with_expired_token_is_forbidden() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let joiner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Stale").await;
    let token = insert_expired_invite(&pool, group_id, owner.id).await;

    let response = join_test_group(&app, &joiner, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_multi_use_token_survives_joins() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Open door").await;
    let (invite_id, token) = create_test_invite(&app, &owner, group_id, false).await;

    assert_eq!(
        join_test_group(&app, &first, &token).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        join_test_group(&app, &second, &token).await.status(),
        StatusCode::OK
    );

    // The invite is still listed.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::GET,
            &format!("/api/v1/groups/{}/invites", group_id),
            &owner.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&invite_id));
}

#[tokio::test]
async fn test_single_use_token_is_consumed() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let first = create_user(&pool).await;
    let second = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "One shot").await;
    let (_invite_id, token) = create_test_invite(&app, &owner, group_id, true).await;

    assert_eq!(
        join_test_group(&app, &first, &token).await.status(),
        StatusCode::OK
    );

    // Consumed: the second join fails like an unknown token.
    assert_eq!(
        join_test_group(&app, &second, &token).await.status(),
        StatusCode::FORBIDDEN
    );

    // And the invite is gone from the listing.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::GET,
            &format!("/api/v1/groups/{}/invites", group_id),
            &owner.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_joining_twice_conflicts() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let joiner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Twice").await;
    let (_invite_id, token) = create_test_invite(&app, &owner, group_id, false).await;

    assert_eq!(
        join_test_group(&app, &joiner, &token).await.status(),
        StatusCode::OK
    );
    assert_eq!(
        join_test_group(&app, &joiner, &token).await.status(),
        StatusCode::CONFLICT
    );
}

// ============================================================================
// Listing / Redaction Tests
// ============================================================================

#[tokio::test]
async fn test_tokens_redacted_for_non_creators() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let member = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Secretive").await;
    let (invite_id, token) = create_test_invite(&app, &owner, group_id, false).await;
    assert_eq!(
        join_test_group(&app, &member, &token).await.status(),
        StatusCode::OK
    );

    // The creator sees the token.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::GET,
            &format!("/api/v1/groups/{}/invites", group_id),
            &owner.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let invite = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"].as_i64() == Some(invite_id))
        .unwrap()
        .clone();
    assert_eq!(invite["token"].as_str(), Some(token.as_str()));
    assert_eq!(invite["created_by"].as_i64(), Some(owner.id));

    // Any other member sees null.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::GET,
            &format!("/api/v1/groups/{}/invites", group_id),
            &member.token,
        ))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    let invite = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"].as_i64() == Some(invite_id))
        .unwrap()
        .clone();
    assert!(invite["token"].is_null());
}

#[tokio::test]
async fn test_list_invites_requires_membership() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let outsider = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Members only").await;

    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::GET,
            &format!("/api/v1/groups/{}/invites", group_id),
            &outsider.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[tokio::test]
async fn test_delete_invite() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Cleanup").await;
    let (invite_id, _token) = create_test_invite(&app, &owner, group_id, false).await;

    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::DELETE,
            &format!("/api/v1/groups/{}/invites/{}", group_id, invite_id),
            &owner.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again reports not-found.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::DELETE,
            &format!("/api/v1/groups/{}/invites/{}", group_id, invite_id),
            &owner.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_invite_scoped_to_group() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let first_group = create_test_group(&app, &owner, "First").await;
    let second_group = create_test_group(&app, &owner, "Second").await;
    let (invite_id, _token) = create_test_invite(&app, &owner, first_group, false).await;

    // The invite belongs to the first group, not the second.
    let response = app
        .clone()
        .oneshot(request_with_auth(
            Method::DELETE,
            &format!("/api/v1/groups/{}/invites/{}", second_group, invite_id),
            &owner.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Preview Tests
// ============================================================================

#[tokio::test]
async fn test_preview_group_without_auth() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Previewable").await;
    let (_invite_id, token) = create_test_invite(&app, &owner, group_id, true).await;

    let response = app
        .clone()
        .oneshot(request_without_auth(
            Method::GET,
            &format!("/api/v1/invites/{}", token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let preview = parse_response_body(response).await;
    assert_eq!(preview["id"].as_i64(), Some(group_id));
    assert_eq!(preview["name"], "Previewable");
    assert_eq!(preview["invite_description"], "integration test invite");
    assert_eq!(preview["invite_single_use"], true);
}

#[tokio::test]
async fn test_preview_with_unknown_token_is_forbidden() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(request_without_auth(
            Method::GET,
            &format!("/api/v1/invites/{}", generate_invite_token()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_preview_with_expired_token_is_forbidden() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let owner = create_user(&pool).await;
    let group_id = create_test_group(&app, &owner, "Stale preview").await;
    let token = insert_expired_invite(&pool, group_id, owner.id).await;

    let response = app
        .clone()
        .oneshot(request_without_auth(
            Method::GET,
            &format!("/api/v1/invites/{}", token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
