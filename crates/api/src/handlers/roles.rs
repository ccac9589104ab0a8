//! Handler for the `/roles` resource.

use axum::extract::State;
use axum::Json;
use pustaka_db::models::role::Role;
use pustaka_db::repositories::RoleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{ok, ApiResponse};
use crate::state::AppState;

/// GET /roles
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Role>>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    if roles.is_empty() {
        return Err(AppError::NotFound("Role tidak ditemukan".to_string()));
    }
    Ok(ok(roles))
}
