//! # Storage Adapters
//!
//! - `memory` - In-memory store with snapshot transactions (tests, embedding)
//! - `rocksdb_adapter` - RocksDB `OptimisticTransactionDB` (feature `rocksdb`)

pub mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb_adapter;

pub use memory::{InMemoryKVStore, InMemoryTxn};

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore, RocksDbTxn};
