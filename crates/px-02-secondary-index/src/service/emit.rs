//! Emit: keep one document's entries under one index in sync with its value.

use crate::domain::errors::IndexError;
use crate::domain::index::Index;
use crate::domain::keys::{
    forward_scan_prefix, validate_derived, validate_primary_key, IndexKey, Partition,
};
use px_01_kv_store::{KvEntry, ScanOptions, Transaction};

/// Replace the entries `index` holds for `key` with the entries derived from
/// `value`. `None` deletes them.
///
/// Runs inside an open read-write transaction. On error the transaction may
/// hold partial changes and must be discarded.
pub fn emit<T>(txn: &mut T, index: &Index, key: &[u8], value: Option<&[u8]>) -> Result<(), IndexError>
where
    T: Transaction + ?Sized,
{
    validate_primary_key(key)?;

    let prefix = forward_scan_prefix(index.hash(), key);
    let stale = txn
        .scan_prefix(&prefix, &prefix, ScanOptions::with_values())?
        .collect::<Result<Vec<KvEntry>, _>>()?;

    // Back-pointers must address this index's reverse partition.
    let reverse_partition = index.partition_prefix(Partition::Reverse);
    if let Some(entry) = stale
        .iter()
        .find(|entry| !entry.value.starts_with(&reverse_partition))
    {
        return Err(IndexError::malformed(
            &entry.value,
            "back-pointer outside the index's reverse partition",
        ));
    }

    for entry in &stale {
        txn.delete(&entry.key)?;
        txn.delete(&entry.value)?;
    }

    let Some(value) = value else {
        tracing::debug!(index = index.name(), removed = stale.len(), "index entries deleted");
        return Ok(());
    };

    let entries = index
        .derive_entries(key, value)
        .map_err(IndexError::IndexFunction)?;
    for entry in &entries {
        validate_derived(&entry.index)?;
    }

    for entry in &entries {
        let reverse = IndexKey::reverse(index.hash(), key, &entry.index);
        let forward = reverse.mirror().encode();
        let reverse = reverse.encode();
        tracing::trace!(
            index = index.name(),
            derived = %String::from_utf8_lossy(&entry.index),
            "writing index entry"
        );
        txn.set(&forward, &reverse)?;
        txn.set(&reverse, &entry.value)?;
    }

    tracing::debug!(
        index = index.name(),
        removed = stale.len(),
        written = entries.len(),
        "index entries replaced"
    );
    Ok(())
}
