//! The registry as a before-commit index builder.

use super::emit::emit;
use crate::domain::errors::IndexError;
use crate::domain::registry::IndexRegistry;
use px_01_kv_store::{BeforeCommit, PendingWrites, Transaction};

impl BeforeCommit for IndexRegistry {
    type Error = IndexError;

    /// Run Emit for every registered index against every pending write.
    fn before_commit<T>(&self, txn: &mut T, writes: &PendingWrites) -> Result<(), IndexError>
    where
        T: Transaction + ?Sized,
    {
        for (key, value) in writes {
            for index in self.iter() {
                emit(txn, index, key, value)?;
            }
        }
        tracing::debug!(
            documents = writes.len(),
            indexes = self.len(),
            "indexes updated for pending writes"
        );
        Ok(())
    }
}
