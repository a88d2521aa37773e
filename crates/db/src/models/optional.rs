//! Optional-feature tag models.

use garagem_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A named feature tag an advert can carry (air conditioning, airbag, ...).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Optional {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
