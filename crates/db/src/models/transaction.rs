//! Loan transaction model and DTOs.

use chrono::NaiveDate;
use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A loan row from the `transactions` table.
///
/// A loan is open while `return_date` is `NULL` and closed once it is set;
/// closed is terminal.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: DbId,
    /// Human-facing numeric loan code, unique-indexed.
    pub code: String,
    pub user_id: DbId,
    pub book_id: DbId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub return_img_url: Option<String>,
    pub penalty: i32,
    pub penalty_desc: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a loan.
pub struct CreateTransaction {
    pub code: String,
    pub user_id: DbId,
    pub book_id: DbId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Completed-return data applied to an open loan.
pub struct CloseTransaction {
    pub return_date: NaiveDate,
    pub penalty: i32,
    pub penalty_desc: Option<String>,
    pub return_img_url: Option<String>,
}

/// Flat row produced by the paginated listing join.
#[derive(Debug, Clone, FromRow)]
pub struct TransactionListRow {
    pub id: DbId,
    pub code: String,
    pub date_to: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub return_img_url: Option<String>,
    pub penalty: i32,
    pub penalty_desc: Option<String>,
    pub book_title: String,
    pub book_author: String,
    pub book_img_url: Option<String>,
    pub book_categories: Vec<String>,
}

/// Borrowed-book summary embedded in a listing entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBook {
    pub title: String,
    pub author: String,
    pub img_url: Option<String>,
    pub categories: Vec<String>,
}

/// One entry of the paginated loan listing, with the due countdown
/// (`due_date` is days until `date_to`, negative when overdue).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListItem {
    pub id: DbId,
    pub code: String,
    pub return_date: Option<NaiveDate>,
    pub return_img_url: Option<String>,
    pub penalty: i32,
    pub penalty_desc: Option<String>,
    pub due_date: i64,
    pub book: TransactionBook,
}
