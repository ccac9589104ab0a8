//! Repository for the `books` table and its category join table.
//!
//! The stock counters (`available`, `borrow_amount`) are never written
//! here; they belong exclusively to [`crate::repositories::TransactionRepo`]
//! so concurrent edits cannot lose loan updates.

use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookPick, BookSummary, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, synopsis, author, year, page_size, publisher, img_url, \
                        pdf_url, available, borrow_amount, created_at, updated_at";

/// Provides catalog CRUD for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book with its category references, atomically.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO books (title, synopsis, author, year, page_size, publisher, img_url, pdf_url, available)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.author)
            .bind(input.year)
            .bind(input.page_size)
            .bind(&input.publisher)
            .bind(&input.img_url)
            .bind(&input.pdf_url)
            .bind(input.available)
            .fetch_one(&mut *tx)
            .await?;

        for category_id in &input.category_ids {
            sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
                .bind(book.id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Find a book by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page through book summaries, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BookSummary>, sqlx::Error> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, author, year, img_url FROM books
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total number of books, for pagination.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(pool)
            .await
    }

    /// The five most-borrowed books.
    pub async fn most_picked(pool: &PgPool) -> Result<Vec<BookPick>, sqlx::Error> {
        sqlx::query_as::<_, BookPick>(
            "SELECT id, title, author, year, img_url, borrow_amount FROM books
             ORDER BY borrow_amount DESC
             LIMIT 5",
        )
        .fetch_all(pool)
        .await
    }

    /// Books referencing the given category.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<BookSummary>, sqlx::Error> {
        sqlx::query_as::<_, BookSummary>(
            "SELECT b.id, b.title, b.author, b.year, b.img_url
             FROM books b
             JOIN book_categories bc ON bc.book_id = b.id
             WHERE bc.category_id = $1
             ORDER BY b.created_at DESC",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }

    /// Category names attached to a book.
    pub async fn category_names(pool: &PgPool, book_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT c.name FROM categories c
             JOIN book_categories bc ON bc.category_id = c.id
             WHERE bc.book_id = $1
             ORDER BY c.name",
        )
        .bind(book_id)
        .fetch_all(pool)
        .await
    }

    /// Update a book's catalog fields. Only non-`None` fields are applied;
    /// when `category_ids` is set the reference list is replaced.
    ///
    /// Returns the row as it was **before** the update so the caller can
    /// release replaced cover/pdf files, or `None` if no such book exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let previous = Self::find_by_id(pool, id).await?;
        if previous.is_none() {
            return Ok(None);
        }

        let mut tx = pool.begin().await?;
        sqlx::query(
            "UPDATE books SET
                title = COALESCE($2, title),
                synopsis = COALESCE($3, synopsis),
                author = COALESCE($4, author),
                year = COALESCE($5, year),
                page_size = COALESCE($6, page_size),
                publisher = COALESCE($7, publisher),
                img_url = COALESCE($8, img_url),
                pdf_url = COALESCE($9, pdf_url),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.synopsis)
        .bind(&input.author)
        .bind(input.year)
        .bind(input.page_size)
        .bind(&input.publisher)
        .bind(&input.img_url)
        .bind(&input.pdf_url)
        .execute(&mut *tx)
        .await?;

        if let Some(category_ids) = &input.category_ids {
            sqlx::query("DELETE FROM book_categories WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for category_id in category_ids {
                sqlx::query("INSERT INTO book_categories (book_id, category_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(category_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(previous)
    }

    /// Delete a book, returning the removed row so the caller can release
    /// its cover and pdf files.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("DELETE FROM books WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
