//! Request handlers for the marketplace API.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `garagem_db` and
//! map errors via [`crate::error::AppError`].

pub mod adverts;
pub mod brands;
pub mod optionals;
