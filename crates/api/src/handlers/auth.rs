//! Handlers for registration, login, token refresh, and logout.

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use pustaka_core::error::CoreError;
use pustaka_core::types::DbId;
use pustaka_db::models::user::CreateUser;
use pustaka_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::jwt::{generate_token_pair, hash_token, validate_refresh_token, TokenPair};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{first_validation_message, AppError, AppResult};
use crate::handlers::MultipartPayload;
use crate::middleware::api_key::RequireApiKey;
use crate::middleware::auth::AuthUser;
use crate::response::{ok, ok_empty, ApiResponse};
use crate::state::AppState;
use crate::uploads;

/// JSON `data` field of `POST /users/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Nama harus diisi"))]
    pub name: String,
    #[validate(email(message = "Email tidak valid, silahkan isi alamat email yang valid"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: String,
    #[validate(length(min = 10, max = 14, message = "Nomor HP tidak valid"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Gender harus diisi"))]
    pub gender: String,
    #[validate(length(min = 1, message = "NIM/NIDN harus diisi"))]
    pub id_number: String,
    pub role_id: DbId,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /users/register
///
/// Multipart: `data` JSON field plus an optional avatar image. The avatar
/// is written to disk first (mirroring the upload pipeline order) and the
/// guard removes it again on any failure, including the duplicate
/// pre-check.
pub async fn register(
    _key: RequireApiKey,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<()>>> {
    let payload = MultipartPayload::read(multipart).await?;

    let mut avatar = None;
    if let Some(file) = payload.any_file() {
        if !pustaka_core::assets::is_image_file(&file.filename) {
            return Err(AppError::BadRequest(
                "Foto profil harus format image".to_string(),
            ));
        }
        avatar = Some(
            uploads::store_field(
                &state.config.assets_root,
                &state.config.base_url,
                "users",
                &file.filename,
                &file.bytes,
            )
            .await?,
        );
    }

    let input: RegisterRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;
    if !input.phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest("Nomor HP tidak valid".to_string()));
    }

    if UserRepo::duplicate_exists(&state.pool, &input.email, &input.id_number).await? {
        return Err(AppError::BadRequest(
            "Email atau NIM/NIDN telah terdaftar, silahkan gunakan Email atau NIM/NIDN lain"
                .to_string(),
        ));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let img_url = avatar.as_ref().map(|a| a.url().to_string());
    UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
            phone_number: input.phone_number,
            gender: input.gender,
            img_url,
            verified: false,
            id_number: input.id_number,
            role_id: input.role_id,
        },
    )
    .await?;

    if let Some(avatar) = avatar {
        avatar.persist();
    }
    Ok(ok_empty())
}

/// POST /users/login
///
/// Verifies the password and issues a fresh token pair as a new session.
/// Existing sessions stay valid (multi-device login).
pub async fn login(
    _key: RequireApiKey,
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email tidak terdaftar".to_string()))?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::BadRequest(
            "Ups!, password tidak valid".to_string(),
        ));
    }

    let pair = issue_session(&state, user.id, user.role_id).await?;
    Ok(ok(pair))
}

/// GET /refreshToken
///
/// Rotates the presented refresh token: one atomic consume-if-match, then
/// a brand-new pair. A consumed or unknown token fails with 401, so a
/// stolen refresh token can be used at most once. Like the access path,
/// a session store error during verification rejects with 401 rather than
/// surfacing a 500.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let token = bearer_token(&headers)?;
    validate_refresh_token(token, &state.config.jwt).map_err(|_| unauthorized())?;

    let user_id = SessionRepo::consume_refresh_token(&state.pool, &hash_token(token))
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "session lookup failed during token refresh");
            unauthorized()
        })?
        .ok_or_else(unauthorized)?;

    // The subject may have been deleted since the token was issued.
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "subject lookup failed during token refresh");
            unauthorized()
        })?
        .ok_or_else(unauthorized)?;

    let pair = issue_session(&state, user.id, user.role_id).await?;
    Ok(ok(pair))
}

/// POST /users/logout
///
/// Revokes every session the caller holds; all outstanding access and
/// refresh tokens stop validating immediately.
pub async fn logout(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<()>>> {
    SessionRepo::revoke_all_for_user(&state.pool, user.user_id).await?;
    Ok(ok_empty())
}

/// Generate a token pair and persist its hashes as one session row.
async fn issue_session(state: &AppState, user_id: DbId, role_id: DbId) -> AppResult<TokenPair> {
    let pair = generate_token_pair(user_id, role_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    SessionRepo::create(
        &state.pool,
        &pustaka_db::models::session::CreateSession {
            user_id,
            access_token_hash: hash_token(&pair.access_token),
            refresh_token_hash: hash_token(&pair.refresh_token),
        },
    )
    .await?;

    Ok(pair)
}

fn bearer_token(headers: &HeaderMap) -> AppResult<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Autentikasi token tidak valid".into(),
    ))
}
