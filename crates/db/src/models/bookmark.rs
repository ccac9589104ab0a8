//! Bookmark model: denormalized book summaries owned by a user.

use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A bookmark row from the `bookmarks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub book_id: DbId,
    pub title: String,
    pub author: String,
    pub img_url: Option<String>,
    pub borrow_amount: i32,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
}

/// DTO for adding a bookmark to a user's list.
pub struct CreateBookmark {
    pub book_id: DbId,
    pub title: String,
    pub author: String,
    pub img_url: Option<String>,
    pub borrow_amount: i32,
}
