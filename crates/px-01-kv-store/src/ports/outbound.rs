//! # Outbound Ports (Driven Ports)
//!
//! The minimum capability set required from the underlying ordered KV engine.
//!
//! Production: `RocksDbStore` (adapters/rocksdb_adapter.rs, feature `rocksdb`)
//! Testing: `InMemoryKVStore` (adapters/memory.rs)
//!
//! Keys MUST sort lexicographically by unsigned byte value. Prefix and range
//! scans in the index layer depend on it.

use crate::domain::errors::KVStoreError;

/// A key/value pair yielded by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl KvEntry {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Forward iterator over a transaction's view of the keyspace.
pub type KvIter<'t> = Box<dyn Iterator<Item = Result<KvEntry, KVStoreError>> + 't>;

/// Iterator options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// When false, adapters may yield empty values (key-only scans).
    pub prefetch_values: bool,
}

impl ScanOptions {
    pub const fn with_values() -> Self {
        Self {
            prefetch_values: true,
        }
    }

    pub const fn keys_only() -> Self {
        Self {
            prefetch_values: false,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::with_values()
    }
}

/// A read-only or read-write transaction.
///
/// Reads observe the transaction's own uncommitted writes.
pub trait Transaction {
    /// Whether this transaction accepts writes.
    fn is_writable(&self) -> bool;

    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Set a single key-value pair.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Seek to the first key `>= seek` and iterate forward.
    fn scan(&self, seek: &[u8], opts: ScanOptions) -> Result<KvIter<'_>, KVStoreError>;

    /// Seek to `seek` and iterate while keys start with `prefix`.
    fn scan_prefix(
        &self,
        seek: &[u8],
        prefix: &[u8],
        opts: ScanOptions,
    ) -> Result<KvIter<'_>, KVStoreError> {
        let prefix = prefix.to_vec();
        let iter = self.scan(seek, opts)?;
        Ok(Box::new(iter.take_while(move |item| match item {
            Ok(entry) => entry.key.starts_with(&prefix),
            Err(_) => true,
        })))
    }

    /// Commit all writes atomically.
    fn commit(self) -> Result<(), KVStoreError>
    where
        Self: Sized;

    /// Drop all writes.
    fn discard(self)
    where
        Self: Sized;
}

/// Abstract interface for an ordered, transactional key-value store.
pub trait KeyValueStore: Send + Sync {
    type Txn<'a>: Transaction
    where
        Self: 'a;

    /// Begin a transaction. Read-only transactions reject writes.
    fn begin(&self, writable: bool) -> Result<Self::Txn<'_>, KVStoreError>;
}
