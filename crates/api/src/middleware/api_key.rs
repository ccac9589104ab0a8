//! Shared API key gate for credential endpoints.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pustaka_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Requires a valid `X-Api-Key` header matching the configured key.
///
/// Registration and login are unauthenticated, so this gate keeps casual
/// scripted abuse off the credential endpoints without a full auth layer.
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if provided.is_empty() || provided != state.config.api_key {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Wrong credentials provided".into(),
            )));
        }
        Ok(RequireApiKey)
    }
}
