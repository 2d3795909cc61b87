//! Invite domain models for group invitations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Length of a generated invite token.
pub const INVITE_TOKEN_LEN: usize = 32;

/// A tokenized credential granting join access to one group.
///
/// The token is only populated for the member who created the invite;
/// everyone else sees `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupInvite {
    pub id: i64,
    pub token: Option<String>,
    pub description: String,
    pub created_by: i64,
    pub valid_until: Option<DateTime<Utc>>,
    pub single_use: bool,
}

/// Request to create a new invite.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteRequest {
    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    /// Whether the invite is deleted after its first successful use.
    #[serde(default)]
    pub single_use: bool,

    /// Optional expiry; when given it must lie in the future.
    #[validate(custom(function = "shared::validation::validate_valid_until"))]
    pub valid_until: Option<DateTime<Utc>>,
}

/// Response after creating an invite.
///
/// The only place besides `list_invites` where the creator learns the
/// token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreateInviteResponse {
    pub id: i64,
    pub group_id: i64,
    pub token: String,
    pub description: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub single_use: bool,
}

/// Response for listing invites.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListInvitesResponse {
    pub data: Vec<GroupInvite>,
    pub count: usize,
}

/// Request to join a group using an invite token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct JoinGroupRequest {
    #[validate(regex(
        path = *INVITE_TOKEN_REGEX,
        message = "Invalid invite token format"
    ))]
    pub invite_token: String,
}

lazy_static::lazy_static! {
    static ref INVITE_TOKEN_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9]{32}$").unwrap();
}

/// Response after joining a group.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct JoinGroupResponse {
    pub group_id: i64,
}

/// Read-only projection shown to an unauthenticated token holder
/// before joining.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupPreview {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub currency_symbol: String,
    pub terms: String,
    pub created_at: DateTime<Utc>,
    pub invite_description: String,
    pub invite_valid_until: Option<DateTime<Utc>>,
    pub invite_single_use: bool,
}

/// Generate a random alphanumeric invite token.
pub fn generate_invite_token() -> String {
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(INVITE_TOKEN_LEN)
        .map(char::from)
        .collect()
}
