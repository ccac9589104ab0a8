//! Shared response envelope types for API handlers.
//!
//! Every success response uses the `{result, status, message}` envelope;
//! errors carry the same shape minus `result` (see [`crate::error`]), so
//! clients can branch on the HTTP status alone.

use axum::Json;
use serde::Serialize;

/// Standard success envelope: `{ "result": ..., "status": 200,
/// "message": "success" }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub result: Option<T>,
    pub status: u16,
    pub message: &'static str,
}

/// Wrap a payload in the success envelope.
pub fn ok<T: Serialize>(result: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        result: Some(result),
        status: 200,
        message: "success",
    })
}

/// Success envelope with a `null` result, for mutations with no payload.
pub fn ok_empty() -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        result: None,
        status: 200,
        message: "success",
    })
}

/// Payload for paginated listings: `{content, totalPage, currentPage}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub content: Vec<T>,
    pub total_page: i64,
    pub current_page: i64,
}
