//! # Domain Errors
//!
//! Error types surfaced by store adapters. The index layer propagates these
//! unchanged; it never retries.

use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },

    /// Another transaction committed a conflicting write first.
    ///
    /// The caller is expected to discard and retry the whole transaction.
    #[error("Transaction conflict: a key touched by this transaction was committed concurrently")]
    Conflict,

    /// A write was attempted through a read-only transaction.
    #[error("Write attempted on a read-only transaction")]
    ReadOnlyTransaction,

    /// Keys must be non-empty.
    #[error("Key cannot be empty")]
    EmptyKey,
}

impl KVStoreError {
    /// Whether retrying the whole transaction may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, KVStoreError::Conflict)
    }
}
