//! Handlers for advert browsing, detail, and publishing.
//!
//! The browse endpoint accepts its filters as loose query parameters and
//! never rejects a request over a malformed value: numeric filters degrade
//! via the lenient parsers in `garagem_core::browse`, and unknown keys are
//! ignored. Only a blank brand slug is a client error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use garagem_core::browse::{
    next_page, page_offset, parse_bound, parse_optionals, parse_page, parse_page_size,
    search_terms,
};
use garagem_core::error::CoreError;
use garagem_core::text::normalize;
use garagem_core::types::DbId;
use garagem_db::models::advert::{AdvertFilter, CreateAdvert};
use garagem_db::repositories::{AdvertRepo, BrandRepo, ModelRepo, OptionalRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

/// GET /api/v1/adverts/filterbybrand/{brand_slug}
///
/// List active adverts of one brand, filtered by the query parameters and
/// paginated. The page and the total row count are fetched concurrently.
pub async fn filter_by_brand(
    State(state): State<AppState>,
    Path(brand_slug): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let brand_slug = brand_slug.trim();
    if brand_slug.is_empty() {
        return Err(AppError::BadRequest("Brand slug must not be blank".into()));
    }

    let (filter, page) = build_filter(brand_slug, &params);

    let (data, total) = tokio::try_join!(
        AdvertRepo::search(&state.pool, &filter),
        AdvertRepo::count(&state.pool, &filter),
    )?;

    Ok(Json(Page {
        data,
        current_page: page,
        next_page: next_page(page, filter.limit, total),
        total,
    }))
}

/// First non-blank occurrence of a query parameter, trimmed.
fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
}

/// Every occurrence of a query parameter, in request order.
fn repeated<'a>(params: &'a [(String, String)], key: &'a str) -> impl Iterator<Item = &'a str> {
    params
        .iter()
        .filter(move |(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Assemble the repository filter from the raw query parameters.
///
/// Returns the filter together with the parsed page number, which the
/// response envelope echoes back as `currentPage`.
fn build_filter(brand_slug: &str, params: &[(String, String)]) -> (AdvertFilter, i64) {
    let page = parse_page(first(params, "pageParam"));
    let limit = parse_page_size(first(params, "limit"));

    let filter = AdvertFilter {
        brand_slug: brand_slug.to_string(),
        search_terms: first(params, "busca").map(search_terms).unwrap_or_default(),
        city: first(params, "cidade").map(normalize),
        state: first(params, "estado").map(normalize),
        // `modelo` is the documented key; `model` is kept for older clients.
        model: first(params, "modelo")
            .or_else(|| first(params, "model"))
            .map(str::to_string),
        color: first(params, "cor").map(normalize),
        transmission: first(params, "cambio").map(normalize),
        doors: first(params, "portas").map(str::to_string),
        optionals: parse_optionals(repeated(params, "opcionais")),
        price_min: parse_bound(first(params, "preco_min")),
        price_max: parse_bound(first(params, "preco_max")),
        mileage_min: parse_bound(first(params, "quilometragem_min")),
        mileage_max: parse_bound(first(params, "quilometragem_max")),
        year_min: parse_bound(first(params, "ano_modelo_min")),
        year_max: parse_bound(first(params, "ano_modelo_max")),
        limit,
        offset: page_offset(page, limit),
    };

    (filter, page)
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /api/v1/adverts/{slug}
///
/// Public advert detail. Only `ACTIVE` adverts are visible here; pending and
/// rejected ones 404 exactly like unknown slugs.
pub async fn advert_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let advert = AdvertRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::SlugNotFound {
            entity: "Advert",
            slug,
        }))?;

    Ok(Json(DataResponse { data: advert }))
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

/// JSON body for publishing an advert.
#[derive(Debug, Deserialize)]
pub struct CreateAdvertRequest {
    pub user_id: DbId,
    pub brand_id: DbId,
    pub model_id: DbId,
    pub price: i64,
    pub mileage: i64,
    pub year_model: i32,
    pub color: String,
    pub transmission: String,
    pub doors: String,
    pub plate: Option<String>,
    pub description: Option<String>,
    pub city: String,
    pub state: String,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Feature tag ids from the optionals catalog.
    #[serde(default)]
    pub optionals: Vec<DbId>,
}

/// POST /api/v1/adverts
///
/// Publish a new advert. The advert starts in `PENDING` status and stays
/// invisible to the public endpoints until moderation activates it. Returns
/// 201 with the expanded projection.
pub async fn create_advert(
    State(state): State<AppState>,
    Json(body): Json<CreateAdvertRequest>,
) -> AppResult<impl IntoResponse> {
    if body.price < 0 {
        return Err(validation("price must not be negative"));
    }
    if body.mileage < 0 {
        return Err(validation("mileage must not be negative"));
    }
    if !(1900..=2100).contains(&body.year_model) {
        return Err(validation("year_model is out of range"));
    }

    let color = required(&body.color, "color")?;
    let transmission = required(&body.transmission, "transmission")?;
    let doors = required(&body.doors, "doors")?;
    let city = required(&body.city, "city")?;
    let state_name = required(&body.state, "state")?;

    let mut images = Vec::with_capacity(body.images.len());
    for url in &body.images {
        images.push(required(url, "image url")?.to_string());
    }

    // Referenced rows must exist before the insert is attempted.
    let user = UserRepo::find_by_id(&state.pool, body.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown user id {}", body.user_id)))?;

    let brand = BrandRepo::find_by_id(&state.pool, body.brand_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown brand id {}", body.brand_id)))?;

    let model = ModelRepo::find_by_id(&state.pool, body.model_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown model id {}", body.model_id)))?;
    if model.brand_id != brand.id {
        return Err(AppError::BadRequest(format!(
            "Model {} does not belong to brand {}",
            model.id, brand.id
        )));
    }

    let mut optional_ids = body.optionals.clone();
    optional_ids.sort_unstable();
    optional_ids.dedup();
    if !optional_ids.is_empty() {
        let known = OptionalRepo::find_by_ids(&state.pool, &optional_ids).await?;
        if known.len() != optional_ids.len() {
            return Err(AppError::BadRequest(
                "Unknown optional id in request".into(),
            ));
        }
    }

    let dto = CreateAdvert {
        user_id: user.id,
        brand_id: brand.id,
        model_id: model.id,
        slug_base: format!("{}-{}", brand.slug, model.slug),
        price: body.price,
        mileage: body.mileage,
        year_model: body.year_model,
        // Stored pre-normalized so every text filter matches fold-free.
        color: normalize(color),
        transmission: normalize(transmission),
        doors: doors.to_string(),
        plate: body.plate.as_deref().map(str::trim).map(str::to_string),
        description: body.description.clone(),
        city: city.to_string(),
        state: state_name.to_string(),
        formatted_city: normalize(city),
        formatted_state: normalize(state_name),
        images,
        optional_ids,
    };

    let advert = AdvertRepo::create(&state.pool, &dto).await?;

    tracing::info!(advert_id = advert.id, slug = %advert.slug, "Advert published");

    let view = AdvertRepo::find_view_by_id(&state.pool, advert.id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Advert {} missing after insert", advert.id))
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

fn validation(msg: &str) -> AppError {
    AppError::Core(CoreError::Validation(msg.to_string()))
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation(&format!("{field} must not be blank")));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
