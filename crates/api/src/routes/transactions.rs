//! Route definitions for the `/transaction` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transactions;
use crate::state::AppState;

/// ```text
/// POST /transaction       -> create (borrow)
/// PUT  /transaction/{id}  -> return_book (multipart proof)
/// GET  /transaction/{id}  -> get
/// GET  /transactions      -> list (paginated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/transaction", post(transactions::create))
        .route(
            "/transaction/{id}",
            get(transactions::get).put(transactions::return_book),
        )
        .route("/transactions", get(transactions::list))
}
