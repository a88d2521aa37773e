//! Repository for the `users` table.

use sqlx::PgPool;

use garagem_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list for `users` SELECT queries. Excludes `password_hash`.
const COLUMNS: &str = "\
    id, name, lastname, email, phone, image, plan, created_at, updated_at";

/// Default plan tier for new accounts.
const DEFAULT_PLAN: &str = "GRATIS";

/// Provides read and insert operations for seller accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a seller account.
    pub async fn create(pool: &PgPool, dto: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, lastname, email, phone, image, plan) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&dto.name)
            .bind(&dto.lastname)
            .bind(&dto.email)
            .bind(&dto.phone)
            .bind(&dto.image)
            .bind(dto.plan.as_deref().unwrap_or(DEFAULT_PLAN))
            .fetch_one(pool)
            .await
    }

    /// Find a seller account by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
