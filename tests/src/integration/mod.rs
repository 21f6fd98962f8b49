//! # Integration Scenarios
//!
//! Scenarios are written against any [`KeyValueStore`](px_01_kv_store::KeyValueStore)
//! so the same assertions run on the in-memory store and, with the `rocksdb`
//! feature, on RocksDB.

pub mod comments;
