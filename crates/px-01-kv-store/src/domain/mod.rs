//! # Domain Layer
//!
//! Pure types shared by every store adapter.
//!
//! ## Modules
//!
//! - `errors` - Store error taxonomy
//! - `pending` - Transaction-scoped map of net document mutations

pub mod errors;
pub mod pending;
