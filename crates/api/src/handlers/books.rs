//! Handlers for the `/book` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use pustaka_core::assets::{file_extension, is_image_file};
use pustaka_core::types::DbId;
use pustaka_db::models::book::{Book, BookPick, BookSummary, CreateBook, UpdateBook};
use pustaka_db::repositories::BookRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{first_validation_message, AppError, AppResult};
use crate::handlers::MultipartPayload;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ok, ok_empty, ApiResponse, Paginated};
use crate::state::AppState;
use crate::uploads::{self, StoredUpload};

/// JSON `data` field of `POST /book`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, message = "Judul buku harus diisi"))]
    pub title: String,
    pub synopsis: Option<String>,
    #[validate(length(min = 1, message = "Penulis buku harus diisi"))]
    pub author: String,
    pub year: i32,
    pub page_size: Option<i32>,
    #[validate(length(min = 1, message = "Penerbit buku harus diisi"))]
    pub publisher: String,
    pub available: i32,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
}

/// JSON `data` field of `PUT /book/:id`. All fields optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, message = "Judul buku harus diisi"))]
    pub title: Option<String>,
    pub synopsis: Option<String>,
    #[validate(length(min = 1, message = "Penulis buku harus diisi"))]
    pub author: Option<String>,
    pub year: Option<i32>,
    pub page_size: Option<i32>,
    #[validate(length(min = 1, message = "Penerbit buku harus diisi"))]
    pub publisher: Option<String>,
    pub category_ids: Option<Vec<DbId>>,
}

/// Detail payload for `GET /book/:id`: the row plus its category names.
#[derive(Debug, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub category: Vec<String>,
}

/// Cover and pdf uploads pulled out of a book multipart request, stored
/// on disk behind guards until the row write commits.
struct BookFiles {
    cover: Option<StoredUpload>,
    pdf: Option<StoredUpload>,
}

impl BookFiles {
    async fn store(state: &AppState, payload: &MultipartPayload) -> AppResult<Self> {
        let mut cover = None;
        let mut pdf = None;

        if let Some(file) = payload.file("cover_book") {
            if !is_image_file(&file.filename) {
                return Err(AppError::BadRequest(
                    "Thumbnail buku harus format image".to_string(),
                ));
            }
            cover = Some(store_book_file(state, &file.filename, &file.bytes).await?);
        }
        if let Some(file) = payload.file("book_pdf") {
            if file_extension(&file.filename).as_deref() != Some("pdf") {
                return Err(AppError::BadRequest(
                    "File buku harus format pdf".to_string(),
                ));
            }
            pdf = Some(store_book_file(state, &file.filename, &file.bytes).await?);
        }

        Ok(BookFiles { cover, pdf })
    }
}

async fn store_book_file(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> AppResult<StoredUpload> {
    uploads::store_field(
        &state.config.assets_root,
        &state.config.base_url,
        "books",
        filename,
        bytes,
    )
    .await
}

/// POST /book
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;
    let files = BookFiles::store(&state, &payload).await?;

    let input: CreateBookRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    BookRepo::create(
        &state.pool,
        &CreateBook {
            title: input.title,
            synopsis: input.synopsis,
            author: input.author,
            year: input.year,
            page_size: input.page_size,
            publisher: input.publisher,
            img_url: files.cover.as_ref().map(|f| f.url().to_string()),
            pdf_url: files.pdf.as_ref().map(|f| f.url().to_string()),
            available: input.available,
            category_ids: input.category_ids,
        },
    )
    .await?;

    if let Some(cover) = files.cover {
        cover.persist();
    }
    if let Some(pdf) = files.pdf {
        pdf.persist();
    }
    Ok(ok_empty())
}

/// PUT /book/:id
///
/// Replaced cover/pdf files are deleted from disk once the row update
/// commits. Stock counters are out of reach here; only the borrow and
/// return flows move them.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;
    let files = BookFiles::store(&state, &payload).await?;

    let input: UpdateBookRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    let changes = UpdateBook {
        title: input.title,
        synopsis: input.synopsis,
        author: input.author,
        year: input.year,
        page_size: input.page_size,
        publisher: input.publisher,
        img_url: files.cover.as_ref().map(|f| f.url().to_string()),
        pdf_url: files.pdf.as_ref().map(|f| f.url().to_string()),
        category_ids: input.category_ids,
    };

    let previous = BookRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::BadRequest("Buku tidak ditemukan".to_string()))?;

    if let Some(cover) = files.cover {
        if let Some(old) = &previous.img_url {
            uploads::delete_asset(&state.config.assets_root, old);
        }
        cover.persist();
    }
    if let Some(pdf) = files.pdf {
        if let Some(old) = &previous.pdf_url {
            uploads::delete_asset(&state.config.assets_root, old);
        }
        pdf.persist();
    }
    Ok(ok_empty())
}

/// GET /books
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<BookSummary>>>> {
    let books = BookRepo::list(&state.pool, params.limit(), params.offset()).await?;
    let count = BookRepo::count(&state.pool).await?;
    Ok(ok(Paginated {
        content: books,
        total_page: params.total_pages(count),
        current_page: params.page(),
    }))
}

/// GET /books-mostpick
pub async fn most_picked(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<BookPick>>>> {
    let books = BookRepo::most_picked(&state.pool).await?;
    Ok(ok(books))
}

/// GET /book/:id
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))?;
    let category = BookRepo::category_names(&state.pool, id).await?;
    Ok(ok(BookDetail { book, category }))
}

/// GET /book-category/:id
pub async fn by_category(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Vec<BookSummary>>>> {
    let books = BookRepo::list_by_category(&state.pool, id).await?;
    if books.is_empty() {
        return Err(AppError::NotFound("Buku tidak ditemukan".to_string()));
    }
    Ok(ok(books))
}

/// DELETE /book/:id
///
/// Removes the stored cover and pdf along with the row.
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = BookRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))?;

    if let Some(img_url) = &removed.img_url {
        uploads::delete_asset(&state.config.assets_root, img_url);
    }
    if let Some(pdf_url) = &removed.pdf_url {
        uploads::delete_asset(&state.config.assets_root, pdf_url);
    }
    Ok(ok_empty())
}
