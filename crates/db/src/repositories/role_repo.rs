//! Repository for the `roles` table.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, descr, created_at, updated_at";

/// Read access to the immutable role reference data.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the role code a user currently holds.
    ///
    /// Reads through the `users` row instead of trusting any role id a
    /// token may carry, so demotions apply to outstanding tokens.
    pub async fn resolve_code_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT r.code FROM roles r JOIN users u ON u.role_id = r.id WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// List all roles ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY code");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }
}
