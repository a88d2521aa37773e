//! Vehicle catalog models: brands and their models.

use garagem_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A vehicle brand row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    /// One of `carros` / `motos` / `caminhoes`.
    pub vehicle_kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vehicle model row, always owned by one brand.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Model {
    pub id: DbId,
    pub brand_id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
