//! # Domain Errors
//!
//! Error types for the secondary index layer.
//!
//! Store errors and index-function errors pass through unchanged. Callers
//! discard the enclosing transaction on any error.

use px_01_kv_store::KVStoreError;
use thiserror::Error;

/// Error type returned by user index functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while maintaining or querying indexes.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A query was issued without an index name.
    #[error("no index name provided")]
    NoIndexName,

    /// An index with this name is already registered.
    #[error("index {name:?} is already registered")]
    DuplicateIndex { name: String },

    /// A primary key or derived value cannot be encoded into an index key.
    #[error("invalid {field}: {reason}")]
    InvalidKeySegment {
        field: &'static str,
        reason: &'static str,
    },

    /// A stored index key or back-pointer does not have the expected shape.
    #[error("malformed index key {key:?}: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    /// The index function failed. Returned verbatim.
    #[error(transparent)]
    IndexFunction(BoxError),

    /// Underlying store error.
    #[error(transparent)]
    Store(#[from] KVStoreError),
}

impl IndexError {
    pub(crate) fn malformed(key: &[u8], reason: &'static str) -> Self {
        IndexError::MalformedKey {
            key: String::from_utf8_lossy(key).into_owned(),
            reason,
        }
    }
}
