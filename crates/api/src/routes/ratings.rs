//! Route definitions for the `/rating` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ratings;
use crate::state::AppState;

/// ```text
/// POST /rating              -> create (authenticated)
/// GET  /ratings             -> list (?id=&page=&limit=)
/// GET  /rating-average/{id} -> average
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rating", post(ratings::create))
        .route("/ratings", get(ratings::list))
        .route("/rating-average/{id}", get(ratings::average))
}
