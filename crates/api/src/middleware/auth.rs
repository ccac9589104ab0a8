//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pustaka_core::error::CoreError;
use pustaka_core::types::DbId;
use pustaka_db::repositories::SessionRepo;

use crate::auth::jwt::{hash_token, validate_access_token};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization`
/// header.
///
/// The token signature is verified first, then the token is checked against
/// the session store: a signed token whose session was revoked (logout) no
/// longer authenticates. Any failure along the way, including a store error,
/// rejects with 401.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The role id embedded in the token. Advisory only; authorization
    /// re-reads the role from the database.
    pub role_id: DbId,
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Autentikasi token tidak valid".into(),
    ))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(unauthorized)?;

        let claims =
            validate_access_token(token, &state.config.jwt).map_err(|_| unauthorized())?;

        let live = SessionRepo::access_token_valid(&state.pool, claims.sub, &hash_token(token))
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "session lookup failed during authentication");
                unauthorized()
            })?;
        if !live {
            return Err(unauthorized());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role_id: claims.role,
        })
    }
}
