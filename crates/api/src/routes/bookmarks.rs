//! Route definitions for the `/bookmark` resource.

use axum::routing::put;
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// ```text
/// PUT /bookmark/{id}    -> add (id = user id)
/// GET /bookmark/{id}    -> list
/// PUT /remove-bookmark  -> remove (?id=&book_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookmark/{id}", put(bookmarks::add).get(bookmarks::list))
        .route("/remove-bookmark", put(bookmarks::remove))
}
