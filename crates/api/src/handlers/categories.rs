//! Handlers for the `/category` resource.

use axum::extract::{Path, State};
use axum::Json;
use pustaka_core::types::DbId;
use pustaka_db::models::category::Category;
use pustaka_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{first_validation_message, AppError, AppResult};
use crate::response::{ok, ok_empty, ApiResponse};
use crate::state::AppState;

/// Request body for category create and update.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, message = "Nama kategori harus diisi"))]
    pub name: String,
}

/// GET /categories
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    if categories.is_empty() {
        return Err(AppError::NotFound("Category tidak ditemukan".to_string()));
    }
    Ok(ok(categories))
}

/// POST /category
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;
    CategoryRepo::create(&state.pool, &input.name).await?;
    Ok(ok_empty())
}

/// PUT /category/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;
    let updated = CategoryRepo::update(&state.pool, id, &input.name).await?;
    if !updated {
        return Err(AppError::BadRequest("Category tidak ditemukan".to_string()));
    }
    Ok(ok_empty())
}

/// DELETE /category/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    CategoryRepo::delete(&state.pool, id).await?;
    Ok(ok_empty())
}
