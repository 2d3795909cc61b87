//! Group repository for database operations.

use sqlx::PgPool;

use crate::entities::GroupEntity;
use crate::metrics::QueryTimer;

/// Description stored on the founding membership row.
const FOUNDER_DESCRIPTION: &str = "group founder";

/// Repository for group-related database operations.
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Creates a new GroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create a new group and add the creator as its owner.
    ///
    /// The group row and the founding membership are inserted in one
    /// transaction; the founder always gets `is_owner` and `can_write`.
    pub async fn create_group(
        &self,
        name: &str,
        description: &str,
        currency_symbol: &str,
        terms: &str,
        created_by: i64,
    ) -> Result<GroupEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_group");

        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO grp (name, description, currency_symbol, terms, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, currency_symbol, terms, created_by, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(currency_symbol)
        .bind(terms)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO group_membership (user_id, group_id, is_owner, can_write, description)
            VALUES ($1, $2, true, true, $3)
            "#,
        )
        .bind(created_by)
        .bind(group.id)
        .bind(FOUNDER_DESCRIPTION)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(group)
    }

    /// Find a group by id.
    pub async fn find_by_id(&self, group_id: i64) -> Result<Option<GroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_group_by_id");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, name, description, currency_symbol, terms, created_by, created_at
            FROM grp
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find all groups a user belongs to.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<GroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_groups_for_user");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT grp.id, grp.name, grp.description, grp.currency_symbol, grp.terms,
                   grp.created_by, grp.created_at
            FROM grp
            JOIN group_membership gm ON grp.id = gm.group_id
            WHERE gm.user_id = $1
            ORDER BY grp.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update a group's mutable fields.
    ///
    /// All four fields are replaced at once.
    pub async fn update_group(
        &self,
        group_id: i64,
        name: &str,
        description: &str,
        currency_symbol: &str,
        terms: &str,
    ) -> Result<GroupEntity, sqlx::Error> {
        let timer = QueryTimer::new("update_group");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            UPDATE grp
            SET name = $2, description = $3, currency_symbol = $4, terms = $5
            WHERE id = $1
            RETURNING id, name, description, currency_symbol, terms, created_by, created_at
            "#,
        )
        .bind(group_id)
        .bind(name)
        .bind(description)
        .bind(currency_symbol)
        .bind(terms)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: GroupRepository tests require a database connection and are covered by integration tests
}
