//! Route definition for the `/roles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// ```text
/// GET /roles -> list (authenticated)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/roles", get(roles::list))
}
