//! Persistence layer for the meal list.
//!
//! # Responsibility
//! - Define the whole-list load/save contract used by the store.
//! - Keep file layout and blob encoding out of service orchestration.
//!
//! # Invariants
//! - The entire ordered list is the unit of persistence.
//! - Decoding applies `Meal` validation to every record; one bad record
//!   fails the whole load.

pub mod meal_repo;
