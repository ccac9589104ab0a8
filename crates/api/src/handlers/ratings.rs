//! Handlers for the `/rating` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use pustaka_core::types::DbId;
use pustaka_db::models::rating::{CreateRating, Rating};
use pustaka_db::repositories::RatingRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::{ok, ok_empty, ApiResponse};
use crate::state::AppState;

/// Request body for `POST /rating`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub book_id: DbId,
    pub rating: i32,
    pub review: Option<String>,
}

/// Query string for `GET /ratings`: the book id plus pagination.
#[derive(Debug, Deserialize)]
pub struct RatingListParams {
    pub id: DbId,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Page of ratings for one book.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPage {
    pub ratings: Vec<Rating>,
    pub total: i64,
    pub current_page: i64,
}

/// Mean rating of one book, zero when unrated.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverage {
    pub rating_average: f64,
}

/// POST /rating
///
/// The rating is attributed to the authenticated caller, never to an id
/// from the body.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRatingRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !(1..=5).contains(&input.rating) {
        return Err(AppError::BadRequest(
            "Rating harus bernilai 1 sampai 5".to_string(),
        ));
    }

    RatingRepo::create(
        &state.pool,
        &CreateRating {
            book_id: input.book_id,
            user_id: user.user_id,
            rating: input.rating,
            review: input.review,
        },
    )
    .await?;
    Ok(ok_empty())
}

/// GET /ratings?id=&page=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RatingListParams>,
) -> AppResult<Json<ApiResponse<RatingPage>>> {
    let pagination = PaginationParams {
        page: params.page,
        limit: params.limit,
    };
    let ratings =
        RatingRepo::list_for_book(&state.pool, params.id, pagination.limit(), pagination.offset())
            .await?;
    let count = RatingRepo::count_for_book(&state.pool, params.id).await?;
    Ok(ok(RatingPage {
        ratings,
        total: pagination.total_pages(count),
        current_page: pagination.page(),
    }))
}

/// GET /rating-average/:id
pub async fn average(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<RatingAverage>>> {
    let rating_average = RatingRepo::average_for_book(&state.pool, id).await?;
    Ok(ok(RatingAverage { rating_average }))
}
