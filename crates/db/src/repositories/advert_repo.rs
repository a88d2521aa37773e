//! Repository for the `adverts` table and its image / optional attachments.
//!
//! The browse WHERE clause is assembled once by [`build_advert_filter`] and
//! shared by the page and count queries, so the two can never disagree about
//! which rows are in the result set.

use std::collections::HashMap;

use sqlx::PgPool;

use garagem_core::browse::upper_bound_or_ceiling;
use garagem_core::types::DbId;
use garagem_core::vehicle::AdvertStatus;

use crate::models::advert::{
    Advert, AdvertFilter, AdvertRow, AdvertView, BrandRef, CreateAdvert, ImageRef, ModelRef,
    OptionalRef, SellerSummary,
};

// ---------------------------------------------------------------------------
// Column lists and join fragment
// ---------------------------------------------------------------------------

/// Column list for full `adverts` rows.
const COLUMNS: &str = "\
    id, slug, user_id, brand_id, model_id, status, price, mileage, \
    year_model, color, transmission, doors, plate, description, city, \
    state, formatted_city, formatted_state, emphasis, created_at, updated_at";

/// Joined projection for browse queries; aliases match [`AdvertRow`].
/// The license plate is not selected.
const VIEW_COLUMNS: &str = "\
    a.id, a.slug, a.status, a.price, a.mileage, a.year_model, a.color, \
    a.transmission, a.doors, a.description, a.city, a.state, a.emphasis, \
    a.created_at, a.updated_at, \
    b.id AS brand_id, b.name AS brand_name, b.slug AS brand_slug, \
    m.id AS model_id, m.name AS model_name, m.slug AS model_slug, \
    u.id AS user_id, u.name AS user_name, u.lastname AS user_lastname, \
    u.image AS user_image, u.email AS user_email, u.phone AS user_phone, \
    u.created_at AS user_created_at";

/// FROM/JOIN fragment shared by the page and count queries.
const FROM_JOINS: &str = "\
    FROM adverts a \
    JOIN brands b ON b.id = a.brand_id \
    JOIN models m ON m.id = a.model_id \
    JOIN users u ON u.id = a.user_id";

// ---------------------------------------------------------------------------
// AdvertRepo
// ---------------------------------------------------------------------------

/// Provides browse, detail, and insert operations for adverts.
pub struct AdvertRepo;

impl AdvertRepo {
    /// Fetch one page of expanded adverts matching the filter.
    ///
    /// Rows are ordered by creation time (oldest first) with the id as a
    /// tiebreaker, so pagination windows never overlap.
    pub async fn search(
        pool: &PgPool,
        filter: &AdvertFilter,
    ) -> Result<Vec<AdvertView>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_advert_filter(filter);

        let query = format!(
            "SELECT {VIEW_COLUMNS} {FROM_JOINS} {where_clause} \
             ORDER BY a.created_at ASC, a.id ASC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_filter_values(sqlx::query_as::<_, AdvertRow>(&query), &bind_values);
        let rows = q
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        Self::expand(pool, rows).await
    }

    /// Count adverts matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &AdvertFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_advert_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count {FROM_JOINS} {where_clause}");

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Expanded detail of one publicly visible (ACTIVE) advert.
    pub async fn find_active_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<AdvertView>, sqlx::Error> {
        let query =
            format!("SELECT {VIEW_COLUMNS} {FROM_JOINS} WHERE a.slug = $1 AND a.status = $2");
        let row = sqlx::query_as::<_, AdvertRow>(&query)
            .bind(slug)
            .bind(AdvertStatus::Active.as_str())
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::expand(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Expanded view of one advert regardless of status (creation response).
    pub async fn find_view_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdvertView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} {FROM_JOINS} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AdvertRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Ok(Self::expand(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Insert an advert with its images and feature links in one transaction.
    ///
    /// New adverts start as PENDING. The slug embeds the generated id
    /// (`{slug_base}-{id}`), so the id is drawn from the sequence up front.
    pub async fn create(pool: &PgPool, dto: &CreateAdvert) -> Result<Advert, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId =
            sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('adverts', 'id'))")
                .fetch_one(&mut *tx)
                .await?;
        let slug = format!("{}-{id}", dto.slug_base);

        let insert = format!(
            "INSERT INTO adverts (id, slug, user_id, brand_id, model_id, status, price, \
             mileage, year_model, color, transmission, doors, plate, description, \
             city, state, formatted_city, formatted_state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
             $15, $16, $17, $18) \
             RETURNING {COLUMNS}"
        );
        let advert = sqlx::query_as::<_, Advert>(&insert)
            .bind(id)
            .bind(&slug)
            .bind(dto.user_id)
            .bind(dto.brand_id)
            .bind(dto.model_id)
            .bind(AdvertStatus::Pending.as_str())
            .bind(dto.price)
            .bind(dto.mileage)
            .bind(dto.year_model)
            .bind(&dto.color)
            .bind(&dto.transmission)
            .bind(&dto.doors)
            .bind(&dto.plate)
            .bind(&dto.description)
            .bind(&dto.city)
            .bind(&dto.state)
            .bind(&dto.formatted_city)
            .bind(&dto.formatted_state)
            .fetch_one(&mut *tx)
            .await?;

        for (position, url) in dto.images.iter().enumerate() {
            sqlx::query("INSERT INTO advert_images (advert_id, url, position) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(url)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        for optional_id in &dto.optional_ids {
            sqlx::query("INSERT INTO advert_optionals (advert_id, optional_id) VALUES ($1, $2)")
                .bind(id)
                .bind(optional_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(advert_id = id, slug = %advert.slug, "Advert created");
        Ok(advert)
    }

    // -----------------------------------------------------------------------
    // Relation expansion
    // -----------------------------------------------------------------------

    /// Attach images and feature tags to a page of rows with two batched
    /// queries, then shape the nested projections.
    async fn expand(pool: &PgPool, rows: Vec<AdvertRow>) -> Result<Vec<AdvertView>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut images = Self::load_images(pool, &ids).await?;
        let mut optionals = Self::load_optionals(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = images.remove(&row.id).unwrap_or_default();
                let optionals = optionals.remove(&row.id).unwrap_or_default();
                AdvertView {
                    id: row.id,
                    slug: row.slug,
                    status: row.status,
                    price: row.price,
                    mileage: row.mileage,
                    year_model: row.year_model,
                    color: row.color,
                    transmission: row.transmission,
                    doors: row.doors,
                    description: row.description,
                    city: row.city,
                    state: row.state,
                    emphasis: row.emphasis,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                    brand: BrandRef {
                        id: row.brand_id,
                        name: row.brand_name,
                        slug: row.brand_slug,
                    },
                    model: ModelRef {
                        id: row.model_id,
                        name: row.model_name,
                        slug: row.model_slug,
                    },
                    images,
                    optionals,
                    user: SellerSummary {
                        id: row.user_id,
                        name: row.user_name,
                        lastname: row.user_lastname,
                        image: row.user_image,
                        email: row.user_email,
                        phone: row.user_phone,
                        created_at: row.user_created_at,
                    },
                }
            })
            .collect())
    }

    /// Load the images of the given adverts, keyed by advert, in display
    /// order.
    async fn load_images(
        pool: &PgPool,
        advert_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ImageRef>>, sqlx::Error> {
        let rows: Vec<(DbId, DbId, String)> = sqlx::query_as(
            "SELECT advert_id, id, url FROM advert_images \
             WHERE advert_id = ANY($1) \
             ORDER BY advert_id, position, id",
        )
        .bind(advert_ids)
        .fetch_all(pool)
        .await?;

        let mut by_advert: HashMap<DbId, Vec<ImageRef>> = HashMap::new();
        for (advert_id, id, url) in rows {
            by_advert
                .entry(advert_id)
                .or_default()
                .push(ImageRef { id, url });
        }
        Ok(by_advert)
    }

    /// Load the feature tags of the given adverts, keyed by advert.
    async fn load_optionals(
        pool: &PgPool,
        advert_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<OptionalRef>>, sqlx::Error> {
        let rows: Vec<(DbId, DbId, String)> = sqlx::query_as(
            "SELECT ao.advert_id, o.id, o.name \
             FROM advert_optionals ao \
             JOIN optionals o ON o.id = ao.optional_id \
             WHERE ao.advert_id = ANY($1) \
             ORDER BY ao.advert_id, o.name",
        )
        .bind(advert_ids)
        .fetch_all(pool)
        .await?;

        let mut by_advert: HashMap<DbId, Vec<OptionalRef>> = HashMap::new();
        for (advert_id, id, name) in rows {
            by_advert
                .entry(advert_id)
                .or_default()
                .push(OptionalRef { id, name });
        }
        Ok(by_advert)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Fields the free-text terms are matched against. Slugs and the formatted
/// location columns are folded by construction; `color` and `transmission`
/// are stored normalized, so a folded needle matches all six.
const SEARCH_FIELDS: [&str; 6] = [
    "a.color",
    "a.transmission",
    "b.slug",
    "m.slug",
    "a.formatted_city",
    "a.formatted_state",
];

/// Typed bind value for dynamically-built advert queries.
#[derive(Debug, PartialEq)]
enum BindValue {
    BigInt(i64),
    Text(String),
    TextArray(Vec<String>),
}

/// Build a WHERE clause and bind values from `AdvertFilter` parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause always
/// starts with `WHERE ` since the status and brand conditions are
/// unconditional; every other filter contributes only when set.
fn build_advert_filter(filter: &AdvertFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    // Only publicly visible listings, always.
    conditions.push(format!("a.status = '{}'", AdvertStatus::Active.as_str()));

    conditions.push(format!("b.slug = ${bind_idx}"));
    bind_idx += 1;
    bind_values.push(BindValue::Text(filter.brand_slug.clone()));

    // Free-text search: one disjunction over every (term, field) pair. Each
    // term is bound once and the placeholder reused across its six fields.
    if !filter.search_terms.is_empty() {
        let mut or_parts: Vec<String> = Vec::new();
        for term in &filter.search_terms {
            for field in SEARCH_FIELDS {
                or_parts.push(format!("{field} ILIKE ${bind_idx}"));
            }
            bind_idx += 1;
            bind_values.push(BindValue::Text(format!("%{term}%")));
        }
        conditions.push(format!("({})", or_parts.join(" OR ")));
    }

    if let Some(ref city) = filter.city {
        conditions.push(format!("a.formatted_city ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{city}%")));
    }

    if let Some(ref state) = filter.state {
        conditions.push(format!("a.formatted_state ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{state}%")));
    }

    if let Some(ref model) = filter.model {
        conditions.push(format!("m.name ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{model}%")));
    }

    if let Some(ref color) = filter.color {
        conditions.push(format!("a.color ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{color}%")));
    }

    if let Some(ref transmission) = filter.transmission {
        conditions.push(format!("a.transmission ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{transmission}%")));
    }

    if let Some(ref doors) = filter.doors {
        conditions.push(format!("a.doors ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{doors}%")));
    }

    if let Some(min) = filter.price_min {
        conditions.push(format!("a.price >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(min));
    }

    // A zero or negative upper bound means "no cap", not "free only"; it is
    // replaced by the ceiling so the clause shape stays identical.
    if let Some(max) = filter.price_max {
        conditions.push(format!("a.price <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(upper_bound_or_ceiling(max)));
    }

    if let Some(min) = filter.mileage_min {
        conditions.push(format!("a.mileage >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(min));
    }

    if let Some(max) = filter.mileage_max {
        conditions.push(format!("a.mileage <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(upper_bound_or_ceiling(max)));
    }

    if let Some(min) = filter.year_min {
        conditions.push(format!("a.year_model >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(min));
    }

    if let Some(max) = filter.year_max {
        conditions.push(format!("a.year_model <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(max));
    }

    // At least one attached feature whose name is in the requested set.
    if !filter.optionals.is_empty() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM advert_optionals ao \
             JOIN optionals o ON o.id = ao.optional_id \
             WHERE ao.advert_id = a.id AND o.name = ANY(${bind_idx}))"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::TextArray(filter.optionals.clone()));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::TextArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
