//! Route definitions for the brand and model catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::brands;
use crate::state::AppState;

/// Brand routes mounted at `/brands`.
///
/// ```text
/// GET /                 -> list_brands (?tipo=carros|motos|caminhoes)
/// GET /{slug}/models    -> list_models
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list_brands))
        .route("/{slug}/models", get(brands::list_models))
}
