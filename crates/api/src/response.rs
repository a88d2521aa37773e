//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope ([`DataResponse`]);
//! paginated listings use [`Page`], which adds the cursor fields the
//! storefront needs to drive infinite scroll.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: advert }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated listing envelope.
///
/// Serializes with camelCase keys to match the storefront contract:
/// `{ "data": [...], "currentPage": 1, "nextPage": 2, "total": 23 }`.
///
/// `next_page` is `None` (serialized as `null`) when the current window
/// already reaches the end of the result set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    pub current_page: i64,
    pub next_page: Option<i64>,
    pub total: i64,
}
