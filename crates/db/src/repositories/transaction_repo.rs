//! Repository for the `transactions` table: the loan lifecycle.
//!
//! Both state transitions run inside a single SQL transaction spanning the
//! `transactions` and `books` tables, so the stock counters and the loan
//! rows can never diverge. The stock counters are written nowhere else.

use chrono::NaiveDate;
use pustaka_core::types::DbId;
use sqlx::PgPool;

use crate::models::transaction::{
    CloseTransaction, CreateTransaction, Transaction, TransactionListRow,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, user_id, book_id, date_from, date_to, return_date, \
                        return_img_url, penalty, penalty_desc, created_at, updated_at";

/// Result of attempting to open a loan.
#[derive(Debug)]
pub enum BorrowOutcome {
    /// Loan created; stock decremented and borrow counter incremented.
    Created(Transaction),
    /// The book exists but has no lendable copies.
    OutOfStock,
    /// No book with the given id.
    BookMissing,
}

/// Result of attempting to close a loan.
#[derive(Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Loan closed; stock incremented.
    Closed,
    /// The loan was already returned; nothing changed.
    AlreadyClosed,
    /// No loan with the given id.
    NotFound,
}

/// Loan lifecycle operations.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Open a loan: decrement the book's stock, bump its borrow counter,
    /// and insert the loan row, all-or-nothing.
    ///
    /// With `allow_negative_stock` unset (the default) the decrement only
    /// matches while `available > 0`, so an exhausted book yields
    /// [`BorrowOutcome::OutOfStock`] and no side effects.
    pub async fn borrow(
        pool: &PgPool,
        input: &CreateTransaction,
        allow_negative_stock: bool,
    ) -> Result<BorrowOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let stock_update = if allow_negative_stock {
            "UPDATE books SET available = available - 1, borrow_amount = borrow_amount + 1,
                 updated_at = NOW()
             WHERE id = $1 RETURNING id"
        } else {
            "UPDATE books SET available = available - 1, borrow_amount = borrow_amount + 1,
                 updated_at = NOW()
             WHERE id = $1 AND available > 0 RETURNING id"
        };
        let decremented: Option<DbId> = sqlx::query_scalar(stock_update)
            .bind(input.book_id)
            .fetch_optional(&mut *tx)
            .await?;

        if decremented.is_none() {
            tx.rollback().await?;
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(input.book_id)
                    .fetch_one(pool)
                    .await?;
            return Ok(if exists {
                BorrowOutcome::OutOfStock
            } else {
                BorrowOutcome::BookMissing
            });
        }

        let query = format!(
            "INSERT INTO transactions (code, user_id, book_id, date_from, date_to)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let transaction = sqlx::query_as::<_, Transaction>(&query)
            .bind(&input.code)
            .bind(input.user_id)
            .bind(input.book_id)
            .bind(input.date_from)
            .bind(input.date_to)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(BorrowOutcome::Created(transaction))
    }

    /// Close a loan: stamp the return fields and give the copy back to the
    /// book's stock, all-or-nothing.
    ///
    /// The `return_date IS NULL` guard makes the transition single-shot: a
    /// second return of the same loan reports
    /// [`ReturnOutcome::AlreadyClosed`] and increments nothing.
    pub async fn close(
        pool: &PgPool,
        id: DbId,
        input: &CloseTransaction,
    ) -> Result<ReturnOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let book_id: Option<DbId> = sqlx::query_scalar(
            "UPDATE transactions SET
                return_date = $2,
                penalty = $3,
                penalty_desc = $4,
                return_img_url = COALESCE($5, return_img_url),
                updated_at = NOW()
             WHERE id = $1 AND return_date IS NULL
             RETURNING book_id",
        )
        .bind(id)
        .bind(input.return_date)
        .bind(input.penalty)
        .bind(&input.penalty_desc)
        .bind(&input.return_img_url)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(book_id) = book_id else {
            tx.rollback().await?;
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM transactions WHERE id = $1)")
                    .bind(id)
                    .fetch_one(pool)
                    .await?;
            return Ok(if exists {
                ReturnOutcome::AlreadyClosed
            } else {
                ReturnOutcome::NotFound
            });
        };

        sqlx::query("UPDATE books SET available = available + 1, updated_at = NOW() WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ReturnOutcome::Closed)
    }

    /// Find a loan by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Page through loans joined with their book summary and category
    /// names, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransactionListRow>, sqlx::Error> {
        sqlx::query_as::<_, TransactionListRow>(
            "SELECT t.id, t.code, t.date_to, t.return_date, t.return_img_url,
                    t.penalty, t.penalty_desc,
                    b.title AS book_title, b.author AS book_author, b.img_url AS book_img_url,
                    COALESCE(array_remove(array_agg(c.name ORDER BY c.name), NULL), '{}')
                        AS book_categories
             FROM transactions t
             JOIN books b ON b.id = t.book_id
             LEFT JOIN book_categories bc ON bc.book_id = b.id
             LEFT JOIN categories c ON c.id = bc.category_id
             GROUP BY t.id, b.id
             ORDER BY t.created_at DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Total number of loans, for pagination.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(pool)
            .await
    }

    /// Due date of an open or closed loan, for penalty computation.
    pub async fn due_date(pool: &PgPool, id: DbId) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar("SELECT date_to FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
