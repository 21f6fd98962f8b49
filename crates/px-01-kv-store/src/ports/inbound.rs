//! # Inbound Ports (Driving Ports)
//!
//! The hook invoked by [`TrackedTxn::commit_with`](crate::TrackedTxn::commit_with)
//! between the last application write and the underlying commit.

use crate::domain::errors::KVStoreError;
use crate::domain::pending::PendingWrites;
use crate::ports::outbound::Transaction;

/// Index builder run before commit.
///
/// Receives the raw inner transaction, so writes made here are NOT recorded
/// as pending document writes, and the net document writes of the enclosing
/// transaction. Everything it writes commits atomically with them.
pub trait BeforeCommit {
    type Error: From<KVStoreError>;

    fn before_commit<T>(&self, txn: &mut T, writes: &PendingWrites) -> Result<(), Self::Error>
    where
        T: Transaction + ?Sized;
}

impl<B: BeforeCommit> BeforeCommit for &B {
    type Error = B::Error;

    fn before_commit<T>(&self, txn: &mut T, writes: &PendingWrites) -> Result<(), Self::Error>
    where
        T: Transaction + ?Sized,
    {
        (**self).before_commit(txn, writes)
    }
}
