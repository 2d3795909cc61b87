//! Invite entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the group_invite table.
///
/// `token` is nullable because listing queries redact it for everyone
/// but the invite's creator.
#[derive(Debug, Clone, FromRow)]
pub struct GroupInviteEntity {
    pub id: i64,
    pub group_id: i64,
    pub token: Option<String>,
    pub description: String,
    pub created_by: i64,
    pub valid_until: Option<DateTime<Utc>>,
    pub single_use: bool,
}

impl From<GroupInviteEntity> for domain::models::GroupInvite {
    fn from(entity: GroupInviteEntity) -> Self {
        Self {
            id: entity.id,
            token: entity.token,
            description: entity.description,
            created_by: entity.created_by,
            valid_until: entity.valid_until,
            single_use: entity.single_use,
        }
    }
}

/// The slice of an invite row needed to perform a join, locked
/// `FOR UPDATE` for the duration of the join transaction.
#[derive(Debug, Clone, FromRow)]
pub struct LiveInviteEntity {
    pub id: i64,
    pub group_id: i64,
    pub created_by: i64,
    pub single_use: bool,
}

/// Group row joined with the presenting invite's metadata.
#[derive(Debug, Clone, FromRow)]
pub struct GroupPreviewEntity {
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

impl From<GroupPreviewEntity> for domain::models::GroupPreview {
    fn from(entity: GroupPreviewEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            currency_symbol: entity.currency_symbol,
            terms: entity.terms,
            created_at: entity.created_at,
            invite_description: entity.invite_description,
            invite_valid_until: entity.invite_valid_until,
            invite_single_use: entity.invite_single_use,
        }
    }
}
