//! Route definitions for the `/news` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// ```text
/// POST   /news       -> create (multipart)
/// GET    /news       -> list (paginated, public)
/// PUT    /news/{id}  -> update (multipart)
/// DELETE /news/{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/news", get(news::list).post(news::create))
        .route("/news/{id}", axum::routing::put(news::update).delete(news::delete))
}
