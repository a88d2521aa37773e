//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create DTOs where rows are inserted through the API
//! - Projection structs shaped for the public browse responses

pub mod advert;
pub mod brand;
pub mod optional;
pub mod user;
