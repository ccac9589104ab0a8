//! Handlers for the `/bookmark` resource.
//!
//! Bookmarks are denormalized book summaries pinned to a user, so the
//! list renders without joining the catalog.

use axum::extract::{Path, Query, State};
use axum::Json;
use pustaka_core::types::DbId;
use pustaka_db::models::bookmark::{Bookmark, CreateBookmark};
use pustaka_db::repositories::BookmarkRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{ok, ok_empty, ApiResponse};
use crate::state::AppState;

/// Request body for `PUT /bookmark/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookmarkRequest {
    pub book_id: DbId,
    pub title: String,
    pub author: String,
    pub img_url: Option<String>,
    #[serde(default)]
    pub borrow_amount: i32,
}

/// Query string for `PUT /remove-bookmark`.
#[derive(Debug, Deserialize)]
pub struct RemoveBookmarkParams {
    pub id: DbId,
    pub book_id: DbId,
}

/// A user's bookmark list, wrapped to match the stored-subdocument shape.
#[derive(Debug, Serialize)]
pub struct BookmarkList {
    pub bookmark: Vec<Bookmark>,
}

/// PUT /bookmark/:id
pub async fn add(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddBookmarkRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let added = BookmarkRepo::add(
        &state.pool,
        id,
        &CreateBookmark {
            book_id: input.book_id,
            title: input.title,
            author: input.author,
            img_url: input.img_url,
            borrow_amount: input.borrow_amount,
        },
    )
    .await?;
    if !added {
        return Err(AppError::BadRequest(
            "Gagal menambahkan buku ke favorit".to_string(),
        ));
    }
    Ok(ok_empty())
}

/// GET /bookmark/:id
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<BookmarkList>>> {
    let bookmark = BookmarkRepo::list_for_user(&state.pool, id).await?;
    if bookmark.is_empty() {
        return Err(AppError::NotFound("Tidak ada bookmark".to_string()));
    }
    Ok(ok(BookmarkList { bookmark }))
}

/// PUT /remove-bookmark?id=&book_id=
pub async fn remove(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RemoveBookmarkParams>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = BookmarkRepo::remove(&state.pool, params.id, params.book_id).await?;
    if !removed {
        return Err(AppError::BadRequest(
            "Gagal menghapus buku dari favorit".to_string(),
        ));
    }
    Ok(ok_empty())
}
