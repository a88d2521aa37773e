//! Handlers for the brand and model catalog.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use garagem_core::error::CoreError;
use garagem_core::text::normalize;
use garagem_core::vehicle::VehicleKind;
use garagem_db::repositories::{BrandRepo, ModelRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the brand listing.
#[derive(Debug, Deserialize)]
pub struct BrandListParams {
    /// Vehicle kind filter (`carros`, `motos`, or `caminhoes`).
    pub tipo: Option<String>,
}

/// GET /api/v1/brands
///
/// List all brands, optionally restricted to one vehicle kind.
pub async fn list_brands(
    State(state): State<AppState>,
    Query(params): Query<BrandListParams>,
) -> AppResult<impl IntoResponse> {
    let kind_filter = params.tipo.as_deref().filter(|t| !t.trim().is_empty());

    let brands = match kind_filter {
        Some(raw) => {
            let kind = VehicleKind::from_str(&normalize(raw))
                .ok_or_else(|| AppError::BadRequest(format!("Unknown vehicle kind '{raw}'")))?;
            BrandRepo::list_by_kind(&state.pool, kind).await?
        }
        None => BrandRepo::list_all(&state.pool).await?,
    };

    Ok(Json(DataResponse { data: brands }))
}

/// GET /api/v1/brands/{slug}/models
///
/// List the models of one brand. 404 when the brand slug is unknown.
pub async fn list_models(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::SlugNotFound {
            entity: "Brand",
            slug,
        }))?;

    let models = ModelRepo::list_by_brand(&state.pool, brand.id).await?;

    Ok(Json(DataResponse { data: models }))
}
