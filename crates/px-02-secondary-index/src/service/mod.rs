//! # Index Service
//!
//! The write path ([`emit`]), the read path ([`query_index`]) and the
//! before-commit hook that runs Emit for every registered index.

mod builder;
mod emit;
mod query;

pub use emit::emit;
pub use query::{query_index, query_index_in};
