//! Domain model for recorded meals.
//!
//! # Responsibility
//! - Define the canonical `Meal` record and its construction-time checks.
//!
//! # Invariants
//! - No invalid `Meal` value can be constructed or decoded.

pub mod meal;
