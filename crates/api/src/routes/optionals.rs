//! Route definitions for the optional feature catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::optionals;
use crate::state::AppState;

/// Optional feature routes mounted at `/optionals`.
///
/// ```text
/// GET /    -> list_optionals
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(optionals::list_optionals))
}
