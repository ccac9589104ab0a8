//! Handlers for the `/user` resource.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use pustaka_core::error::CoreError;
use pustaka_core::types::DbId;
use pustaka_db::models::user::{UpdateUser, User};
use pustaka_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{first_validation_message, AppError, AppResult};
use crate::handlers::MultipartPayload;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::{ok, ok_empty, ApiResponse};
use crate::state::AppState;
use crate::uploads;

/// JSON `data` field of `PUT /user/:id`. All fields optional; only the
/// ones present are applied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Nama harus diisi"))]
    pub name: Option<String>,
    #[validate(email(message = "Email tidak valid, silahkan isi alamat email yang valid"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: Option<String>,
    #[validate(length(min = 10, max = 14, message = "Nomor HP tidak valid"))]
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "NIM/NIDN harus diisi"))]
    pub id_number: Option<String>,
    pub role_id: Option<DbId>,
}

/// Request body for `PUT /user-verify/:id`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub verified: bool,
}

/// GET /users
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = UserRepo::list(&state.pool).await?;
    if users.is_empty() {
        return Err(AppError::NotFound("Data user tidak ditemukan".to_string()));
    }
    Ok(ok(users))
}

/// GET /user/:id
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(ok(user))
}

/// PUT /user/:id
///
/// Multipart: `data` JSON field plus an optional replacement avatar. When
/// a new avatar lands, the previous file is removed after the row update
/// commits.
pub async fn update(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
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

    let input: UpdateUserRequest = payload.parse_data()?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(first_validation_message(&e)))?;

    let password_hash = match &input.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?,
        ),
        None => None,
    };

    let changes = UpdateUser {
        name: input.name,
        email: input.email,
        password_hash,
        phone_number: input.phone_number,
        gender: input.gender,
        img_url: avatar.as_ref().map(|a| a.url().to_string()),
        id_number: input.id_number,
        role_id: input.role_id,
    };

    let previous = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("User tidak ditemukan".to_string()))?;

    if let Some(avatar) = avatar {
        if let Some(old_url) = &previous.img_url {
            uploads::delete_asset(&state.config.assets_root, old_url);
        }
        avatar.persist();
    }
    Ok(ok_empty())
}

/// PUT /user-verify/:id
///
/// Super Admin only, and never on the caller's own account.
pub async fn verify(
    RequireSuperAdmin(caller): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    // The subject must still exist; a stale token cannot verify anyone.
    UserRepo::find_by_id(&state.pool, caller.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "!Ups, akun anda tidak bisa melakukan verifikasi".into(),
            ))
        })?;

    if caller.user_id == id {
        return Err(AppError::Core(CoreError::Unauthorized(
            "!Ups, tidak bisa melakukan verifikasi pada akun sendiri".into(),
        )));
    }

    let updated = UserRepo::set_verified(&state.pool, id, input.verified).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(ok_empty())
}

/// DELETE /user/:id
///
/// Super Admin only. The stored avatar is removed along with the row.
pub async fn delete(
    _caller: RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = UserRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User tidak ditemukan".to_string()))?;

    if let Some(img_url) = &removed.img_url {
        uploads::delete_asset(&state.config.assets_root, img_url);
    }
    Ok(ok_empty())
}
