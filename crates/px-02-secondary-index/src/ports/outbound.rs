//! # Outbound Ports (Driven Ports)
//!
//! Index functions are supplied by the application. They must be pure:
//! the same `(key, value)` always derives the same entries.

use crate::domain::errors::BoxError;
use crate::domain::index::IndexEntry;

/// Derives zero or more index entries from a document.
pub trait IndexFn: Send + Sync {
    fn derive_entries(&self, key: &[u8], value: &[u8]) -> Result<Vec<IndexEntry>, BoxError>;
}

impl<F> IndexFn for F
where
    F: Fn(&[u8], &[u8]) -> Result<Vec<IndexEntry>, BoxError> + Send + Sync,
{
    fn derive_entries(&self, key: &[u8], value: &[u8]) -> Result<Vec<IndexEntry>, BoxError> {
        self(key, value)
    }
}
