//! # Database Service
//!
//! Transaction helpers layered over a [`KeyValueStore`](crate::KeyValueStore).
//!
//! ## Architecture
//!
//! This service:
//! 1. Wraps store transactions in [`TrackedTxn`] so document writes are
//!    recorded as [`PendingWrites`](crate::PendingWrites)
//! 2. Runs a [`BeforeCommit`](crate::BeforeCommit) builder between the last
//!    document write and the commit
//! 3. Discards the transaction whenever a closure or builder fails

mod database;
mod tracked;

pub use database::Database;
pub use tracked::TrackedTxn;
