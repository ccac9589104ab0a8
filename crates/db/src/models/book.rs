//! Book model and DTOs.

use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A book row from the `books` table.
///
/// `available` and `borrow_amount` are mutated exclusively by
/// `TransactionRepo`; the generic update path never touches them.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub synopsis: Option<String>,
    pub author: String,
    pub year: i32,
    pub page_size: Option<i32>,
    pub publisher: String,
    pub img_url: Option<String>,
    pub pdf_url: Option<String>,
    pub available: i32,
    pub borrow_amount: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Book summary for paginated listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub img_url: Option<String>,
}

/// Book summary for the most-borrowed listing.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPick {
    pub id: DbId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub img_url: Option<String>,
    pub borrow_amount: i32,
}

/// DTO for inserting a new book.
pub struct CreateBook {
    pub title: String,
    pub synopsis: Option<String>,
    pub author: String,
    pub year: i32,
    pub page_size: Option<i32>,
    pub publisher: String,
    pub img_url: Option<String>,
    pub pdf_url: Option<String>,
    pub available: i32,
    pub category_ids: Vec<DbId>,
}

/// DTO for updating a book. Only non-`None` fields are applied; the stock
/// counters are deliberately absent.
#[derive(Default)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub page_size: Option<i32>,
    pub publisher: Option<String>,
    pub img_url: Option<String>,
    pub pdf_url: Option<String>,
    pub category_ids: Option<Vec<DbId>>,
}
