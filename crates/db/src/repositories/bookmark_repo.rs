//! Repository for the `bookmarks` table.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::bookmark::{Bookmark, CreateBookmark};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, title, author, img_url, borrow_amount, created_at";

/// Bookmark operations, always scoped to an owning user.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Append a book summary to a user's bookmark list.
    ///
    /// Returns `false` when the user does not exist.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateBookmark,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (user_id, book_id, title, author, img_url, borrow_amount)
             SELECT $1, $2, $3, $4, $5, $6 WHERE EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(user_id)
        .bind(input.book_id)
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.img_url)
        .bind(input.borrow_amount)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's bookmarks, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bookmarks WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a bookmarked book from a user's list.
    ///
    /// Returns `true` if at least one entry was removed.
    pub async fn remove(pool: &PgPool, user_id: DbId, book_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
