//! Domain error taxonomy shared across the workspace.

use crate::types::DbId;

/// Domain-level error returned by core logic and repositories.
///
/// HTTP mapping lives in `pustaka-api`; this type is transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A field or business-rule constraint was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested state transition is not permitted (e.g. returning an
    /// already-closed loan, duplicate unique value).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not permitted.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unexpected failure; the message is logged, never sent to clients.
    #[error("internal error: {0}")]
    Internal(String),
}
