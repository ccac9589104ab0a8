//! Handlers for the `/news` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use pustaka_core::assets::is_image_file;
use pustaka_core::types::DbId;
use pustaka_db::models::news::{CreateNews, News, UpdateNews};
use pustaka_db::repositories::NewsRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{first_validation_message, AppError, AppResult};
use crate::handlers::MultipartPayload;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ok, ok_empty, ApiResponse, Paginated};
use crate::state::AppState;
use crate::uploads::{self, StoredUpload};

/// JSON `data` field of `POST /news`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, message = "Judul berita harus diisi"))]
    pub title: String,
    #[validate(length(min = 1, message = "Deskripsi berita harus diisi"))]
    pub descr: String,
    pub content_url: Option<String>,
}

/// JSON `data` field of `PUT /news/:id`. All fields optional.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, message = "Judul berita harus diisi"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Deskripsi berita harus diisi"))]
    pub descr: Option<String>,
    pub content_url: Option<String>,
}

async fn store_news_image(
    state: &AppState,
    payload: &MultipartPayload,
) -> AppResult<Option<StoredUpload>> {
    let Some(file) = payload.any_file() else {
        return Ok(None);
    };
    if !is_image_file(&file.filename) {
        return Err(AppError::BadRequest(
            "Gambar berita harus format image".to_string(),
        ));
    }
    let stored = uploads::store_field(
        &state.config.assets_root,
        &state.config.base_url,
        "news",
        &file.filename,
        &file.bytes,
    )
    .await?;
    Ok(Some(stored))
}

/// POST /news
pub async fn create(
    _user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;
    let image = store_news_image(&state, &payload).await?;

    let input: CreateNewsRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    NewsRepo::create(
        &state.pool,
        &CreateNews {
            title: input.title,
            descr: input.descr,
            img_url: image.as_ref().map(|f| f.url().to_string()),
            content_url: input.content_url,
        },
    )
    .await?;

    if let Some(image) = image {
        image.persist();
    }
    Ok(ok_empty())
}

/// GET /news
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ApiResponse<Paginated<News>>>> {
    let news = NewsRepo::list(&state.pool, params.limit(), params.offset()).await?;
    let count = NewsRepo::count(&state.pool).await?;
    Ok(ok(Paginated {
        content: news,
        total_page: params.total_pages(count),
        current_page: params.page(),
    }))
}

/// PUT /news/:id
///
/// A replacement image deletes the previous one after the row update
/// commits.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;
    let image = store_news_image(&state, &payload).await?;

    let input: UpdateNewsRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    let changes = UpdateNews {
        title: input.title,
        descr: input.descr,
        img_url: image.as_ref().map(|f| f.url().to_string()),
        content_url: input.content_url,
    };

    let previous = NewsRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Data tidak ditemukan".to_string()))?;

    if let Some(image) = image {
        if let Some(old) = &previous.img_url {
            uploads::delete_asset(&state.config.assets_root, old);
        }
        image.persist();
    }
    Ok(ok_empty())
}

/// DELETE /news/:id
pub async fn delete(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = NewsRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Data tidak ditemukan".to_string()))?;

    if let Some(img_url) = &removed.img_url {
        uploads::delete_asset(&state.config.assets_root, img_url);
    }
    Ok(ok_empty())
}
