//! # Secondary Index Layer (px-02)
//!
//! Named secondary indexes stored inside the same flat, byte-ordered keyspace
//! as the documents they index.
//!
//! ## Architecture
//!
//! ```text
//! update_with(|txn| txn.set(pk, doc), &registry)
//!          │
//!          ↓ PendingWrites (pk → final value)
//! IndexRegistry::before_commit
//!          │  for every (pk, value) × every registered index
//!          ↓
//!        emit ──delete stale──→ ^hash>^pk^*   and their back-pointers
//!          │
//!          └──derive + write──→ ^hash>^pk^derived = ^hash<^derived^pk
//!                               ^hash<^derived^pk = payload
//!
//! query_index ──scan──→ ^hash<^[prefix] ... ^hash<^end^
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Mirror | Forward entries of (index, pk) mirror the latest derived values |
//! | 2 | Deletion Completeness | Deleting a document removes all its entries |
//! | 3 | Atomicity | Index writes commit with the document write |
//! | 4 | Disjoint Partitions | Each index name owns a fixed-width hashed prefix |
//! | 5 | Delimiter Safety | `^` never appears inside a key segment |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Key codec, name hash, index definitions, registry, query types
//! - `ports/` - The `IndexFn` trait implemented by user index functions
//! - `service/` - `emit`, `query_index`, and the registry's before-commit hook

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::{BoxError, IndexError};
pub use domain::hash::{fnv1a_64, IndexHash};
pub use domain::index::{Index, IndexEntry};
pub use domain::keys::{IndexKey, Partition};
pub use domain::query::{IndexQuery, QueryOutcome, QueryResult, DEFAULT_QUERY_LIMIT};
pub use domain::registry::IndexRegistry;
pub use ports::outbound::IndexFn;
pub use service::{emit, query_index, query_index_in};
