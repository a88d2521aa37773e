//! Handlers for the optional feature catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use garagem_db::repositories::OptionalRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/optionals
///
/// List the full optional feature catalog, ordered by name.
pub async fn list_optionals(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let optionals = OptionalRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: optionals }))
}
