//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- validates a Bearer access token and its session
//!   allow-list membership.
//! - [`rbac::RequireSuperAdmin`] -- role check re-resolved from the
//!   database.
//! - [`api_key::RequireApiKey`] -- shared-key gate for credential routes.

pub mod api_key;
pub mod auth;
pub mod rbac;
