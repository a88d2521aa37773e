//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod advert_repo;
pub mod brand_repo;
pub mod optional_repo;
pub mod user_repo;

pub use advert_repo::AdvertRepo;
pub use brand_repo::{BrandRepo, ModelRepo};
pub use optional_repo::OptionalRepo;
pub use user_repo::UserRepo;
