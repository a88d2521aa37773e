pub mod adverts;
pub mod brands;
pub mod health;
pub mod optionals;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /adverts/filterbybrand/{slug}    filtered brand listing (GET)
/// /adverts/{slug}                  public advert detail (GET)
/// /adverts                         publish advert (POST)
///
/// /brands                          list brands (?tipo=carros|motos|caminhoes)
/// /brands/{slug}/models            models of a brand
///
/// /optionals                       vehicle feature catalog
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Advert listing, detail, and publishing.
        .nest("/adverts", adverts::router())
        // Brand and model catalog.
        .nest("/brands", brands::router())
        // Optional feature catalog.
        .nest("/optionals", optionals::router())
}
