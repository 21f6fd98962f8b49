//! # Domain Layer
//!
//! Pure types for the index layer: no store access happens here.

pub mod errors;
pub mod hash;
pub mod index;
pub mod keys;
pub mod query;
pub mod registry;
