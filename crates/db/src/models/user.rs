//! User model and DTOs.

use pustaka_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user row from the `users` table.
///
/// The password hash is never serialized into responses.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub img_url: Option<String>,
    pub verified: bool,
    pub id_number: String,
    pub role_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user.
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub img_url: Option<String>,
    pub verified: bool,
    pub id_number: String,
    pub role_id: DbId,
}

/// DTO for updating a user's profile. Only non-`None` fields are applied.
#[derive(Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub img_url: Option<String>,
    pub id_number: Option<String>,
    pub role_id: Option<DbId>,
}
