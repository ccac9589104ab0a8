//! Route definitions for registration, login, refresh, and logout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// POST /users/register  -> register (api-key gated, multipart)
/// POST /users/login     -> login (api-key gated)
/// GET  /refreshToken    -> refresh (bearer refresh token)
/// POST /users/logout    -> logout (bearer access token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/refreshToken", get(auth::refresh))
        .route("/users/logout", post(auth::logout))
}
