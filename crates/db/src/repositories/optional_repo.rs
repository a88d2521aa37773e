//! Repository for the `optionals` table.

use sqlx::PgPool;

use garagem_core::types::DbId;

use crate::models::optional::Optional;

/// Column list for `optionals` SELECT queries.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides operations for the optional-feature tag catalog.
pub struct OptionalRepo;

impl OptionalRepo {
    /// Insert a feature tag.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Optional, sqlx::Error> {
        let query = format!("INSERT INTO optionals (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Optional>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all feature tags ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Optional>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM optionals ORDER BY name");
        sqlx::query_as::<_, Optional>(&query).fetch_all(pool).await
    }

    /// Fetch the feature tags with the given IDs, in any order.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Optional>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM optionals WHERE id = ANY($1)");
        sqlx::query_as::<_, Optional>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
