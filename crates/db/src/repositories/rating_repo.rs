//! Repository for the `ratings` table.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{CreateRating, Rating};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, book_id, user_id, rating, review, created_at";

/// Provides rating submission and aggregation.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a new rating, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRating) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (book_id, user_id, rating, review)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(input.book_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.review)
            .fetch_one(pool)
            .await
    }

    /// Page through a book's ratings, newest first.
    pub async fn list_for_book(
        pool: &PgPool,
        book_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Rating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ratings WHERE book_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(book_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of ratings a book has received, for pagination.
    pub async fn count_for_book(pool: &PgPool, book_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE book_id = $1")
            .bind(book_id)
            .fetch_one(pool)
            .await
    }

    /// Mean rating for a book; 0 when unrated.
    pub async fn average_for_book(pool: &PgPool, book_id: DbId) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(AVG(rating)::DOUBLE PRECISION, 0) FROM ratings WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_one(pool)
        .await
    }
}
