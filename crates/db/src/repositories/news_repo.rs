//! Repository for the `news` table.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::news::{CreateNews, News, UpdateNews};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, descr, img_url, content_url, created_at, updated_at";

/// Provides CRUD operations for news articles.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNews) -> Result<News, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, descr, img_url, content_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(&input.title)
            .bind(&input.descr)
            .bind(&input.img_url)
            .bind(&input.content_url)
            .fetch_one(pool)
            .await
    }

    /// Page through articles, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<News>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, News>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of articles, for pagination.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(pool)
            .await
    }

    /// Update an article. Only non-`None` fields are applied.
    ///
    /// Returns the row as it was **before** the update so the caller can
    /// release a replaced image file, or `None` if no such article exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNews,
    ) -> Result<Option<News>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        let previous = sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        if previous.is_none() {
            return Ok(None);
        }

        sqlx::query(
            "UPDATE news SET
                title = COALESCE($2, title),
                descr = COALESCE($3, descr),
                img_url = COALESCE($4, img_url),
                content_url = COALESCE($5, content_url),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.descr)
        .bind(&input.img_url)
        .bind(&input.content_url)
        .execute(pool)
        .await?;
        Ok(previous)
    }

    /// Delete an article, returning the removed row so the caller can
    /// release its image file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<News>, sqlx::Error> {
        let query = format!("DELETE FROM news WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, News>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
