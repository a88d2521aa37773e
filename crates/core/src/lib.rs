//! Pure domain logic for the garagem marketplace.
//!
//! This crate has no internal dependencies so it can be used by the
//! repository layer, the API server, and any future CLI tooling alike.

pub mod browse;
pub mod error;
pub mod text;
pub mod types;
pub mod vehicle;
