//! Membership entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::MembershipFlags;
use sqlx::FromRow;

/// The permission flags of one membership row.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct MembershipFlagsEntity {
    pub can_write: bool,
    pub is_owner: bool,
}

impl From<MembershipFlagsEntity> for MembershipFlags {
    fn from(entity: MembershipFlagsEntity) -> Self {
        Self {
            can_write: entity.can_write,
            is_owner: entity.is_owner,
        }
    }
}

/// Membership row joined with user info for listing members.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserEntity {
    pub user_id: i64,
    pub username: String,
    pub is_owner: bool,
    pub can_write: bool,
    pub description: String,
    pub invited_by: Option<i64>,
    pub joined_at: DateTime<Utc>,
}

impl From<MemberWithUserEntity> for domain::models::GroupMember {
    fn from(entity: MemberWithUserEntity) -> Self {
        Self {
            user_id: entity.user_id,
            username: entity.username,
            is_owner: entity.is_owner,
            can_write: entity.can_write,
            description: entity.description,
            invited_by: entity.invited_by,
            joined_at: entity.joined_at,
        }
    }
}
