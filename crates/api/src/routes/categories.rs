//! Route definitions for the `/category` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// ```text
/// GET    /categories     -> list
/// POST   /category       -> create
/// PUT    /category/{id}  -> update
/// DELETE /category/{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list))
        .route("/category", post(categories::create))
        .route(
            "/category/{id}",
            put(categories::update).delete(categories::delete),
        )
}
