//! Role-based access control (RBAC) extractor.
//!
//! Wraps [`AuthUser`] and rejects requests whose role does not meet the
//! requirement. The role code is resolved from the caller's database row on
//! every check rather than trusted from the token, so a demoted user loses
//! elevated access as soon as the row changes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pustaka_core::error::CoreError;
use pustaka_core::roles::ROLE_SUPER_ADMIN;
use pustaka_db::repositories::RoleRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden(
        "User tidak memiliki akses perintah".into(),
    ))
}

async fn resolve_role_code(state: &AppState, user: &AuthUser) -> Result<i32, AppError> {
    RoleRepo::resolve_code_for_user(&state.pool, user.user_id)
        .await?
        .ok_or_else(forbidden)
}

/// Requires the Super Admin role (code 0).
///
/// ```ignore
/// async fn super_admin_only(RequireSuperAdmin(user): RequireSuperAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if resolve_role_code(state, &user).await? != ROLE_SUPER_ADMIN {
            return Err(forbidden());
        }
        Ok(RequireSuperAdmin(user))
    }
}
