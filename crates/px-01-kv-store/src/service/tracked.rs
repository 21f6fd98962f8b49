//! Transaction wrapper that records document writes.

use crate::domain::errors::KVStoreError;
use crate::domain::pending::PendingWrites;
use crate::ports::inbound::BeforeCommit;
use crate::ports::outbound::{KvIter, ScanOptions, Transaction};

/// A store transaction whose `set`/`delete` calls are recorded.
///
/// Reads and scans pass straight through to the inner transaction.
pub struct TrackedTxn<T> {
    inner: T,
    pending: PendingWrites,
}

impl<T: Transaction> TrackedTxn<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            pending: PendingWrites::new(),
        }
    }

    /// Net document writes recorded so far.
    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Run `builder` over the recorded writes, then commit.
    ///
    /// The builder writes through the raw inner transaction, so its own
    /// writes are never fed back to it. If the builder fails the transaction
    /// is discarded and nothing is committed.
    pub fn commit_with<B>(self, builder: &B) -> Result<(), B::Error>
    where
        B: BeforeCommit,
    {
        let Self { mut inner, pending } = self;

        if !pending.is_empty() {
            tracing::debug!(writes = pending.len(), "running before-commit builder");
            if let Err(e) = builder.before_commit(&mut inner, &pending) {
                inner.discard();
                return Err(e);
            }
        }

        inner.commit()?;
        Ok(())
    }
}

impl<T: Transaction> Transaction for TrackedTxn<T> {
    fn is_writable(&self) -> bool {
        self.inner.is_writable()
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.inner.set(key, value)?;
        self.pending.record_set(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.inner.delete(key)?;
        self.pending.record_delete(key);
        Ok(())
    }

    fn scan(&self, seek: &[u8], opts: ScanOptions) -> Result<KvIter<'_>, KVStoreError> {
        self.inner.scan(seek, opts)
    }

    /// Commit without running any builder.
    fn commit(self) -> Result<(), KVStoreError> {
        self.inner.commit()
    }

    fn discard(self) {
        self.inner.discard()
    }
}
