//! Rating model and DTOs.

use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A rating row from the `ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: DbId,
    pub book_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a rating.
pub struct CreateRating {
    pub book_id: DbId,
    pub user_id: DbId,
    pub rating: i32,
    pub review: Option<String>,
}
