//! Membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The capability pair attached to a membership row.
///
/// An owner always has write access; the pair is normalized before any
/// write to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MembershipFlags {
    pub can_write: bool,
    pub is_owner: bool,
}

impl MembershipFlags {
    /// Flags granted to a group founder.
    pub fn founder() -> Self {
        Self {
            can_write: true,
            is_owner: true,
        }
    }

    /// Flags granted when joining via an invite token.
    pub fn joined() -> Self {
        Self {
            can_write: false,
            is_owner: false,
        }
    }

    /// Forces `can_write` for owners.
    pub fn normalized(self) -> Self {
        Self {
            can_write: self.can_write || self.is_owner,
            is_owner: self.is_owner,
        }
    }
}

/// A user's membership in a group, joined with user info.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GroupMember {
    pub user_id: i64,
    pub username: String,
    pub is_owner: bool,
    pub can_write: bool,
    pub description: String,
    pub invited_by: Option<i64>,
    pub joined_at: DateTime<Utc>,
}

/// Request to change another member's permission flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMemberPermissionsRequest {
    pub can_write: bool,
    pub is_owner: bool,
}

impl UpdateMemberPermissionsRequest {
    /// The flags that will actually be stored.
    pub fn requested_flags(&self) -> MembershipFlags {
        MembershipFlags {
            can_write: self.can_write,
            is_owner: self.is_owner,
        }
        .normalized()
    }
}

/// Response for listing group members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListMembersResponse {
    pub data: Vec<GroupMember>,
    pub count: usize,
}
