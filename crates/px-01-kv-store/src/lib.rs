//! # KV Store Port (px-01)
//!
//! The store collaborator consumed by the index layer. The index layer never
//! talks to a storage engine directly; it only sees the [`KeyValueStore`] and
//! [`Transaction`] ports defined here.
//!
//! ## Architecture
//!
//! ```text
//! Application ──set/delete──→ TrackedTxn ──(records PendingWrites)
//!                                  │
//!                           commit_with(builder)
//!                                  │
//!                                  ↓
//!               BeforeCommit::before_commit(&mut inner, &pending)
//!                                  │
//!                                  ↓
//!                         inner.commit()  ──→ KeyValueStore
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Byte Ordering | Scans yield keys in unsigned byte-lexicographic order |
//! | 2 | Read Your Writes | A transaction observes its own uncommitted writes |
//! | 3 | Idempotent Delete | Deleting an absent key succeeds |
//! | 4 | Last Write Wins | `PendingWrites` keeps one net mutation per key |
//! | 5 | Atomic Commit | Builder writes and document writes commit together |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Errors and the pending-writes map
//! - `ports/` - Store and transaction traits, the before-commit hook
//! - `adapters/` - In-memory store and (feature `rocksdb`) RocksDB store
//! - `service/` - `TrackedTxn` and the `Database` handle
//!
//! ## Usage
//!
//! ```ignore
//! use px_01_kv_store::{Database, InMemoryKVStore, Transaction};
//!
//! let db = Database::new(InMemoryKVStore::new());
//! db.update_with(|txn| txn.set(b"doc:1", b"{}"), &registry)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
pub use domain::errors::KVStoreError;
pub use domain::pending::PendingWrites;
pub use ports::inbound::BeforeCommit;
pub use ports::outbound::{KeyValueStore, KvEntry, KvIter, ScanOptions, Transaction};
pub use service::{Database, TrackedTxn};
