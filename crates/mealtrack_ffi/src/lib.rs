//! Flutter bridge for the meal tracker core.

pub mod api;
