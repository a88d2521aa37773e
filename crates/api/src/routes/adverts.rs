//! Route definitions for vehicle adverts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::adverts;
use crate::state::AppState;

/// Advert routes mounted at `/adverts`.
///
/// ```text
/// GET  /filterbybrand/{slug}   -> filter_by_brand
/// GET  /{slug}                 -> advert_detail
/// POST /                       -> create_advert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(adverts::create_advert))
        .route("/filterbybrand/{slug}", get(adverts::filter_by_brand))
        .route("/{slug}", get(adverts::advert_detail))
}
