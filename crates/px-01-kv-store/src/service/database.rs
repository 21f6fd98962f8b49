//! Database handle with closure-scoped transactions.

use super::tracked::TrackedTxn;
use crate::domain::errors::KVStoreError;
use crate::ports::inbound::BeforeCommit;
use crate::ports::outbound::{KeyValueStore, Transaction};

/// Owns a store and hands out tracked transactions.
pub struct Database<S> {
    store: S,
}

impl<S: KeyValueStore> Database<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Begin a tracked transaction.
    pub fn begin(&self, writable: bool) -> Result<TrackedTxn<S::Txn<'_>>, KVStoreError> {
        Ok(TrackedTxn::new(self.store.begin(writable)?))
    }

    /// Run `f` in a read-only transaction.
    pub fn view<'s, R, E, F>(&'s self, f: F) -> Result<R, E>
    where
        F: FnOnce(&TrackedTxn<S::Txn<'s>>) -> Result<R, E>,
        E: From<KVStoreError>,
    {
        let txn = self.begin(false)?;
        let result = f(&txn);
        txn.discard();
        result
    }

    /// Run `f` in a read-write transaction and commit it. No builder runs.
    pub fn update<'s, R, E, F>(&'s self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut TrackedTxn<S::Txn<'s>>) -> Result<R, E>,
        E: From<KVStoreError>,
    {
        let mut txn = self.begin(true)?;
        match f(&mut txn) {
            Ok(value) => {
                txn.commit()?;
                Ok(value)
            }
            Err(e) => {
                txn.discard();
                Err(e)
            }
        }
    }

    /// Run `f` in a read-write transaction, then `builder`, then commit.
    pub fn update_with<'s, R, F, B>(&'s self, f: F, builder: &B) -> Result<R, B::Error>
    where
        F: FnOnce(&mut TrackedTxn<S::Txn<'s>>) -> Result<R, B::Error>,
        B: BeforeCommit,
    {
        let mut txn = self.begin(true)?;
        match f(&mut txn) {
            Ok(value) => {
                txn.commit_with(builder)?;
                Ok(value)
            }
            Err(e) => {
                txn.discard();
                Err(e)
            }
        }
    }
}
