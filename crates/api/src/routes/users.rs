//! Route definitions for the `/user` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET    /users            -> list
/// GET    /user/{id}        -> get
/// PUT    /user/{id}        -> update (multipart)
/// DELETE /user/{id}        -> delete (Super Admin)
/// PUT    /user-verify/{id} -> verify (Super Admin, not self)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list))
        .route(
            "/user/{id}",
            get(users::get).put(users::update).delete(users::delete),
        )
        .route("/user-verify/{id}", put(users::verify))
}
