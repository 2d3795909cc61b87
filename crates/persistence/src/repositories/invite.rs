//! Invite repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::{GroupInviteEntity, GroupPreviewEntity, LiveInviteEntity};
use crate::metrics::QueryTimer;

/// Repository for invite-related database operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new invite.
    pub async fn create_invite(
        &self,
        group_id: i64,
        token: &str,
        description: &str,
        created_by: i64,
        valid_until: Option<DateTime<Utc>>,
        single_use: bool,
    ) -> Result<GroupInviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invite");
        let result = sqlx::query_as::<_, GroupInviteEntity>(
            r#"
            INSERT INTO group_invite (group_id, token, description, created_by, valid_until, single_use)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, group_id, token, description, created_by, valid_until, single_use
            "#,
        )
        .bind(group_id)
        .bind(token)
        .bind(description)
        .bind(created_by)
        .bind(valid_until)
        .bind(single_use)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an invite scoped to its group.
    ///
    /// Returns the number of deleted rows; 0 means no such invite in
    /// that group.
    pub async fn delete_invite(&self, group_id: i64, invite_id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_invite");
        let result = sqlx::query(
            r#"
            DELETE FROM group_invite
            WHERE id = $1 AND group_id = $2
            "#,
        )
        .bind(invite_id)
        .bind(group_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// List a group's invites as seen by one member.
    ///
    /// The token column is redacted to NULL for invites the viewer did
    /// not create.
    pub async fn list_invites(
        &self,
        group_id: i64,
        viewer_id: i64,
    ) -> Result<Vec<GroupInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_invites");
        let result = sqlx::query_as::<_, GroupInviteEntity>(
            r#"
            SELECT id, group_id,
                   CASE WHEN created_by = $1 THEN token ELSE NULL END AS token,
                   description, created_by, valid_until, single_use
            FROM group_invite gi
            WHERE gi.group_id = $2
            ORDER BY gi.id ASC
            "#,
        )
        .bind(viewer_id)
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Resolve a token to the group preview shown before joining.
    ///
    /// Expired tokens resolve to `None`, same as unknown ones.
    pub async fn preview_by_token(
        &self,
        token: &str,
    ) -> Result<Option<GroupPreviewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("preview_group_by_token");
        let result = sqlx::query_as::<_, GroupPreviewEntity>(
            r#"
            SELECT grp.id, grp.name, grp.description, grp.currency_symbol, grp.terms,
                   grp.created_at,
                   inv.description AS invite_description,
                   inv.valid_until AS invite_valid_until,
                   inv.single_use AS invite_single_use
            FROM grp
            JOIN group_invite inv ON grp.id = inv.group_id
            WHERE inv.token = $1
              AND (inv.valid_until IS NULL OR inv.valid_until > now())
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Consume an invite token: insert a read-only, non-owner
    /// membership and drop the invite when it is single-use.
    ///
    /// The whole operation runs in one transaction with the invite row
    /// locked `FOR UPDATE`, so concurrent joins against the same
    /// single-use token serialize; the loser sees no row and gets
    /// `None`, exactly like an unknown or expired token.
    pub async fn join_by_token(
        &self,
        user_id: i64,
        token: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("join_group_by_token");

        let mut tx = self.pool.begin().await?;

        let invite = sqlx::query_as::<_, LiveInviteEntity>(
            r#"
            SELECT id, group_id, created_by, single_use
            FROM group_invite gi
            WHERE gi.token = $1
              AND (gi.valid_until IS NULL OR gi.valid_until > now())
            FOR UPDATE
            "#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(invite) = invite else {
            return Ok(None);
        };

        sqlx::query(
            r#"
            INSERT INTO group_membership (user_id, group_id, invited_by, is_owner, can_write)
            VALUES ($1, $2, $3, false, false)
            "#,
        )
        .bind(user_id)
        .bind(invite.group_id)
        .bind(invite.created_by)
        .execute(&mut *tx)
        .await?;

        if invite.single_use {
            sqlx::query("DELETE FROM group_invite WHERE id = $1")
                .bind(invite.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        timer.record();
        Ok(Some(invite.group_id))
    }
}
