//! Seller account models.

use garagem_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A seller account row.
///
/// `password_hash` is deliberately absent: credentials belong to the external
/// auth provider and are never loaded, let alone serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub lastname: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub image: Option<String>,
    pub plan: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a seller account (fixtures and account sync).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub lastname: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub image: Option<String>,
    /// Plan tier; defaults to `GRATIS` when `None`.
    pub plan: Option<String>,
}
