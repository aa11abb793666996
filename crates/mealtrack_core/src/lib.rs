//! Core domain logic for the meal tracker.
//! This crate is the single source of truth for meal invariants and for the
//! persisted meal list.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::meal::{Meal, MealValidationError, MAX_RATING, MIN_RATING};
pub use repo::meal_repo::{
    decode_blob, encode_blob, FileMealRepository, MealRepository, RepoError, RepoResult,
    BLOB_VERSION, MEALS_FILE_NAME,
};
pub use service::meal_store::{MealStore, StoreError, StoreOrigin};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
