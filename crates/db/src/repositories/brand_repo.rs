//! Repository for the `brands` and `models` tables.

use sqlx::PgPool;

use garagem_core::text::slugify;
use garagem_core::types::DbId;
use garagem_core::vehicle::VehicleKind;

use crate::models::brand::{Brand, Model};

/// Column list for `brands` SELECT queries.
const BRAND_COLUMNS: &str = "\
    id, name, slug, vehicle_kind, created_at, updated_at";

/// Column list for `models` SELECT queries.
const MODEL_COLUMNS: &str = "\
    id, brand_id, name, slug, created_at, updated_at";

// ---------------------------------------------------------------------------
// BrandRepo
// ---------------------------------------------------------------------------

/// Provides catalog operations for vehicle brands.
pub struct BrandRepo;

impl BrandRepo {
    /// Insert a brand; the slug is derived from the name.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        vehicle_kind: VehicleKind,
    ) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, slug, vehicle_kind) \
             VALUES ($1, $2, $3) \
             RETURNING {BRAND_COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .bind(slugify(name))
            .bind(vehicle_kind.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all brands ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands ORDER BY name");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// List the brands of one vehicle kind, ordered by name.
    pub async fn list_by_kind(
        pool: &PgPool,
        vehicle_kind: VehicleKind,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        let query =
            format!("SELECT {BRAND_COLUMNS} FROM brands WHERE vehicle_kind = $1 ORDER BY name");
        sqlx::query_as::<_, Brand>(&query)
            .bind(vehicle_kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// Find a brand by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands WHERE slug = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a brand by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// ModelRepo
// ---------------------------------------------------------------------------

/// Provides catalog operations for vehicle models.
pub struct ModelRepo;

impl ModelRepo {
    /// Insert a model under a brand; the slug is derived from the name.
    pub async fn create(pool: &PgPool, brand_id: DbId, name: &str) -> Result<Model, sqlx::Error> {
        let query = format!(
            "INSERT INTO models (brand_id, name, slug) \
             VALUES ($1, $2, $3) \
             RETURNING {MODEL_COLUMNS}"
        );
        sqlx::query_as::<_, Model>(&query)
            .bind(brand_id)
            .bind(name)
            .bind(slugify(name))
            .fetch_one(pool)
            .await
    }

    /// List the models of one brand, ordered by name.
    pub async fn list_by_brand(pool: &PgPool, brand_id: DbId) -> Result<Vec<Model>, sqlx::Error> {
        let query =
            format!("SELECT {MODEL_COLUMNS} FROM models WHERE brand_id = $1 ORDER BY name");
        sqlx::query_as::<_, Model>(&query)
            .bind(brand_id)
            .fetch_all(pool)
            .await
    }

    /// Find a model by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Model>, sqlx::Error> {
        let query = format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = $1");
        sqlx::query_as::<_, Model>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
