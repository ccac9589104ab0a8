//! Well-known role codes.
//!
//! These must match the seed data in `0001_initial.sql`. Codes are ordinal:
//! lower code means more privilege.

/// Full privileges, including user verification and deletion.
pub const ROLE_SUPER_ADMIN: i32 = 0;

/// Catalog and content management.
pub const ROLE_ADMIN: i32 = 1;

/// Regular library member.
pub const ROLE_MEMBER: i32 = 2;
