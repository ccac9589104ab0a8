//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access/refresh token pairs and token hashing.

pub mod jwt;
pub mod password;
