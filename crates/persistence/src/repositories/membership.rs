//! Membership repository for database operations.

use sqlx::PgPool;

use crate::entities::{MemberWithUserEntity, MembershipFlagsEntity};
use crate::metrics::QueryTimer;

/// Repository for membership-related database operations.
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Creates a new MembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch the permission flags of one member, `None` when the user
    /// is not a member of the group.
    pub async fn flags(
        &self,
        group_id: i64,
        user_id: i64,
    ) -> Result<Option<MembershipFlagsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("membership_flags");
        let result = sqlx::query_as::<_, MembershipFlagsEntity>(
            r#"
            SELECT can_write, is_owner
            FROM group_membership
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all memberships of a group joined with user info.
    pub async fn list_members(
        &self,
        group_id: i64,
    ) -> Result<Vec<MemberWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_group_members");
        let result = sqlx::query_as::<_, MemberWithUserEntity>(
            r#"
            SELECT usr.id AS user_id, usr.username, gm.is_owner, gm.can_write,
                   gm.description, gm.invited_by, gm.joined_at
            FROM usr
            JOIN group_membership gm ON gm.user_id = usr.id
            WHERE gm.group_id = $1
            ORDER BY gm.joined_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Overwrite a member's permission flags.
    ///
    /// Returns the number of affected rows; 0 means the membership does
    /// not exist.
    pub async fn update_permissions(
        &self,
        group_id: i64,
        member_id: i64,
        can_write: bool,
        is_owner: bool,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_member_permissions");
        let result = sqlx::query(
            r#"
            UPDATE group_membership gm
            SET can_write = $3, is_owner = $4
            WHERE gm.group_id = $1 AND gm.user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(member_id)
        .bind(can_write)
        .bind(is_owner)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
