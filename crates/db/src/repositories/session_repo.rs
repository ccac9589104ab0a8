//! Repository for the `sessions` table: the server-side allow-list that
//! makes logout and refresh rotation possible on top of stateless JWTs.
//!
//! One row per issued access/refresh pair. A user may hold any number of
//! concurrent rows (multi-device); issuing never touches existing rows.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, access_token_hash, refresh_token_hash, created_at";

/// Session allow-list operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Append a session to a user's allow-list, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, access_token_hash, refresh_token_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.access_token_hash)
            .bind(&input.refresh_token_hash)
            .fetch_one(pool)
            .await
    }

    /// Whether the user still holds a session with this access-token hash.
    ///
    /// A cryptographically valid access token is only honored while its
    /// owning row exists; removing the row revokes it immediately.
    pub async fn access_token_valid(
        pool: &PgPool,
        user_id: DbId,
        access_token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM sessions WHERE user_id = $1 AND access_token_hash = $2)",
        )
        .bind(user_id)
        .bind(access_token_hash)
        .fetch_one(pool)
        .await
    }

    /// Atomically consume a refresh token: blank it out of its owning row
    /// and return the user id, or `None` when no row matches.
    ///
    /// The single conditional UPDATE is the whole verify-and-invalidate
    /// step, so two concurrent refresh attempts with the same token cannot
    /// both succeed. The row itself survives, which keeps the access token
    /// issued alongside the consumed refresh token honored until its own
    /// expiry or an explicit revocation.
    pub async fn consume_refresh_token(
        pool: &PgPool,
        refresh_token_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE sessions SET refresh_token_hash = NULL
             WHERE refresh_token_hash = $1
             RETURNING user_id",
        )
        .bind(refresh_token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Revoke every session a user holds. Returns the count of removed rows.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of live sessions a user holds.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
