//! Route definitions for the `/book` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// ```text
/// POST   /book                -> create (multipart cover_book + book_pdf)
/// PUT    /book/{id}           -> update (multipart)
/// DELETE /book/{id}           -> delete
/// GET    /book/{id}           -> get
/// GET    /books               -> list (paginated)
/// GET    /books-mostpick      -> most_picked
/// GET    /book-category/{id}  -> by_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/book", post(books::create))
        .route(
            "/book/{id}",
            get(books::get).put(books::update).delete(books::delete),
        )
        .route("/books", get(books::list))
        .route("/books-mostpick", get(books::most_picked))
        .route("/book-category/{id}", get(books::by_category))
}
