//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory meal list for one running session.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod meal_store;
