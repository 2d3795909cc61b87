//! Group entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the grp table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub currency_symbol: String,
    pub terms: String,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<GroupEntity> for domain::models::Group {
    fn from(entity: GroupEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            currency_symbol: entity.currency_symbol,
            terms: entity.terms,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}
