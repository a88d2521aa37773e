//! Advert entity, filter descriptor, and browse projections.

use garagem_core::browse::DEFAULT_PAGE_SIZE;
use garagem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Advert entity
// ---------------------------------------------------------------------------

/// A full advert row as stored, including internal-only columns.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Advert {
    pub id: DbId,
    pub slug: String,
    pub user_id: DbId,
    pub brand_id: DbId,
    pub model_id: DbId,
    pub status: String,
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
    pub formatted_city: String,
    pub formatted_state: String,
    pub emphasis: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// DTO for inserting a new advert with its images and feature links.
///
/// The handler prepares all derived fields: `slug_base` (the final slug is
/// `{slug_base}-{id}`), the normalized location/color/transmission copies,
/// and the validated `optional_ids`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdvert {
    pub user_id: DbId,
    pub brand_id: DbId,
    pub model_id: DbId,
    pub slug_base: String,
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
    pub formatted_city: String,
    pub formatted_state: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Feature tag ids, already validated against `optionals`.
    pub optional_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Filter descriptor
// ---------------------------------------------------------------------------

/// Filter parameters for the browse query, produced by the request parser.
///
/// Absence of a field always means "no constraint". Text needles targeting
/// the folded columns (`city`, `state`, `color`, `transmission`, and every
/// entry of `search_terms`) arrive pre-normalized; `model` and `doors` are
/// matched as given, case-insensitively.
#[derive(Debug, Clone)]
pub struct AdvertFilter {
    /// Brand slug from the route path. Required.
    pub brand_slug: String,
    /// Normalized free-text terms, each matched against six columns.
    pub search_terms: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Substring of the model name.
    pub model: Option<String>,
    pub color: Option<String>,
    pub transmission: Option<String>,
    pub doors: Option<String>,
    /// Feature names; an advert matches when it carries at least one.
    pub optionals: Vec<String>,
    pub price_min: Option<i64>,
    /// Upper price bound; zero or negative values are replaced by the
    /// unbounded ceiling when the predicate is assembled.
    pub price_max: Option<i64>,
    pub mileage_min: Option<i64>,
    pub mileage_max: Option<i64>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for AdvertFilter {
    fn default() -> Self {
        Self {
            brand_slug: String::new(),
            search_terms: Vec::new(),
            city: None,
            state: None,
            model: None,
            color: None,
            transmission: None,
            doors: None,
            optionals: Vec::new(),
            price_min: None,
            price_max: None,
            mileage_min: None,
            mileage_max: None,
            year_min: None,
            year_max: None,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Browse projections
// ---------------------------------------------------------------------------

/// Flat row produced by the joined browse query. Expanded into an
/// [`AdvertView`] once images and optionals are batch-loaded.
#[derive(Debug, Clone, FromRow)]
pub struct AdvertRow {
    pub id: DbId,
    pub slug: String,
    pub status: String,
    pub price: i64,
    pub mileage: i64,
    pub year_model: i32,
    pub color: String,
    pub transmission: String,
    pub doors: String,
    pub description: Option<String>,
    pub city: String,
    pub state: String,
    pub emphasis: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub brand_id: DbId,
    pub brand_name: String,
    pub brand_slug: String,
    pub model_id: DbId,
    pub model_name: String,
    pub model_slug: String,
    pub user_id: DbId,
    pub user_name: String,
    pub user_lastname: Option<String>,
    pub user_image: Option<String>,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub user_created_at: Timestamp,
}

/// An advert expanded with its relations, as served by the browse and
/// detail endpoints. The license plate is internal and never appears here.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertView {
    pub id: DbId,
    pub slug: String,
    pub status: String,
    pub price: i64,
    pub mileage: i64,
    pub year_model: i32,
    pub color: String,
    pub transmission: String,
    pub doors: String,
    pub description: Option<String>,
    pub city: String,
    pub state: String,
    pub emphasis: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub brand: BrandRef,
    pub model: ModelRef,
    /// In display order (insertion order preserved by `position`).
    pub images: Vec<ImageRef>,
    pub optionals: Vec<OptionalRef>,
    pub user: SellerSummary,
}

/// Brand as embedded in an advert projection.
#[derive(Debug, Clone, Serialize)]
pub struct BrandRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// Model as embedded in an advert projection.
#[derive(Debug, Clone, Serialize)]
pub struct ModelRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// Image as embedded in an advert projection.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageRef {
    pub id: DbId,
    pub url: String,
}

/// Feature tag as embedded in an advert projection.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OptionalRef {
    pub id: DbId,
    pub name: String,
}

/// Redacted seller view embedded in advert projections. Exposes contact
/// fields only; credentials and plan data stay internal.
#[derive(Debug, Clone, Serialize)]
pub struct SellerSummary {
    pub id: DbId,
    pub name: String,
    pub lastname: Option<String>,
    pub image: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
}
