//! Session model: one row per issued access/refresh token pair.

use pustaka_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Tokens are stored as SHA-256 hashes; rows are never serialized to
/// clients. `refresh_token_hash` is `None` once the refresh token has been
/// consumed by a rotation.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a session to a user's allow-list.
pub struct CreateSession {
    pub user_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
}
