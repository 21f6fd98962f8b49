//! # RocksDB Storage Adapter
//!
//! Production implementation of the [`KeyValueStore`] port on top of
//! `rocksdb::OptimisticTransactionDB`.
//!
//! ## Features
//!
//! - Optimistic transactions with snapshot-based conflict checking
//! - Read-your-own-writes iterators (transaction raw iterator)
//! - Snappy compression
//! - Bloom filters for point reads
//!
//! ## Keyspace
//!
//! Documents and index entries share the default column family. The index
//! layer partitions it by key prefix, so no extra column families are opened.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvEntry, KvIter, ScanOptions, Transaction};
use rocksdb::{
    DBRawIteratorWithThreadMode, ErrorKind, OptimisticTransactionDB,
    OptimisticTransactionOptions, Options, WriteOptions,
};
use std::path::Path;

type RocksTransaction<'db> = rocksdb::Transaction<'db, OptimisticTransactionDB>;

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 256MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 64MB)
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3)
    pub max_write_buffer_number: i32,
    /// Target file size for level-1 (default: 64MB)
    pub target_file_size_base: u64,
    /// Enable fsync on every commit (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/peripheral".to_string(),
            block_cache_size: 256 * 1024 * 1024, // 256MB
            write_buffer_size: 64 * 1024 * 1024, // 64MB
            max_write_buffer_number: 3,
            target_file_size_base: 64 * 1024 * 1024, // 64MB
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,  // 8MB
            write_buffer_size: 4 * 1024 * 1024, // 4MB
            max_write_buffer_number: 2,
            target_file_size_base: 4 * 1024 * 1024, // 4MB
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store implementing the KeyValueStore trait
pub struct RocksDbStore {
    db: OptimisticTransactionDB,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Performance tuning
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_target_file_size_base(config.target_file_size_base);

        // Compression
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = OptimisticTransactionDB::open(&opts, &config.path).map_err(|e| {
            KVStoreError::IOError {
                message: format!("Failed to open RocksDB: {}", e),
            }
        })?;

        tracing::info!(path = %config.path, "RocksDB store opened");
        Ok(Self { db, config })
    }

    /// Open with default tuning at `path`
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        let config = RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::open(config)
    }

    pub fn config(&self) -> &RocksDbConfig {
        &self.config
    }
}

impl KeyValueStore for RocksDbStore {
    type Txn<'a> = RocksDbTxn<'a>;

    fn begin(&self, writable: bool) -> Result<RocksDbTxn<'_>, KVStoreError> {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        let mut txn_opts = OptimisticTransactionOptions::new();
        txn_opts.set_snapshot(true);

        Ok(RocksDbTxn {
            txn: self.db.transaction_opt(&write_opts, &txn_opts),
            writable,
        })
    }
}

/// Transaction over a [`RocksDbStore`].
pub struct RocksDbTxn<'db> {
    txn: RocksTransaction<'db>,
    writable: bool,
}

impl RocksDbTxn<'_> {
    fn check_write(&self, key: &[u8]) -> Result<(), KVStoreError> {
        if !self.writable {
            return Err(KVStoreError::ReadOnlyTransaction);
        }
        if key.is_empty() {
            return Err(KVStoreError::EmptyKey);
        }
        Ok(())
    }
}

impl Transaction for RocksDbTxn<'_> {
    fn is_writable(&self) -> bool {
        self.writable
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        if key.is_empty() {
            return Err(KVStoreError::EmptyKey);
        }
        self.txn.get(key).map_err(|e| map_rocksdb_error("get", e))
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check_write(key)?;
        self.txn
            .put(key, value)
            .map_err(|e| map_rocksdb_error("put", e))
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.check_write(key)?;
        self.txn
            .delete(key)
            .map_err(|e| map_rocksdb_error("delete", e))
    }

    fn scan(&self, seek: &[u8], opts: ScanOptions) -> Result<KvIter<'_>, KVStoreError> {
        let mut iter = self.txn.raw_iterator();
        iter.seek(seek);
        Ok(Box::new(RawScan {
            iter,
            prefetch_values: opts.prefetch_values,
            done: false,
        }))
    }

    fn commit(self) -> Result<(), KVStoreError> {
        if !self.writable {
            return Ok(());
        }
        self.txn
            .commit()
            .map_err(|e| map_rocksdb_error("commit", e))
    }

    fn discard(self) {
        if let Err(e) = self.txn.rollback() {
            tracing::warn!(error = %e, "RocksDB rollback failed");
        }
    }
}

/// Adapts the seek/valid/next raw iterator to [`KvIter`].
struct RawScan<'a, 'db> {
    iter: DBRawIteratorWithThreadMode<'a, RocksTransaction<'db>>,
    prefetch_values: bool,
    done: bool,
}

impl Iterator for RawScan<'_, '_> {
    type Item = Result<KvEntry, KVStoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.iter.valid() {
            self.done = true;
            return match self.iter.status() {
                Ok(()) => None,
                Err(e) => Some(Err(map_rocksdb_error("scan", e))),
            };
        }
        let key = self.iter.key()?.to_vec();
        let value = if self.prefetch_values {
            self.iter.value().map(<[u8]>::to_vec).unwrap_or_default()
        } else {
            Vec::new()
        };
        self.iter.next();
        Some(Ok(KvEntry { key, value }))
    }
}

fn map_rocksdb_error(op: &str, e: rocksdb::Error) -> KVStoreError {
    match e.kind() {
        ErrorKind::Busy | ErrorKind::TryAgain => KVStoreError::Conflict,
        ErrorKind::Corruption => KVStoreError::CorruptionError {
            message: format!("RocksDB {} failed: {}", op, e),
        },
        _ => KVStoreError::IOError {
            message: format!("RocksDB {} failed: {}", op, e),
        },
    }
}
