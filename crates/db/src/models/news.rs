//! News article model and DTOs.

use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A news row from the `news` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub descr: String,
    pub img_url: Option<String>,
    pub content_url: Option<String>,
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// DTO for inserting a news article.
pub struct CreateNews {
    pub title: String,
    pub descr: String,
    pub img_url: Option<String>,
    pub content_url: Option<String>,
}

/// DTO for updating a news article. Only non-`None` fields are applied.
#[derive(Default)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub descr: Option<String>,
    pub img_url: Option<String>,
    pub content_url: Option<String>,
}
